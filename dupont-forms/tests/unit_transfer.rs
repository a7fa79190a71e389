//! Transferred products on the 2-simplex, checked on every triple of basis elements


use dupont_forms::{DupontForm, Rational, Tree};
use pretty_assertions::assert_eq;
use relations::{shuffle_3, stasheff};

fn w(key: &str) -> DupontForm {
    DupontForm::basis_element(2, key).unwrap()
}

#[test]
fn stasheff_relation_arity_three() {
    let basis = DupontForm::basis(2);
    for a in &basis {
        for b in &basis {
            for c in &basis {
                let args = [a.clone(), b.clone(), c.clone()];
                assert!(stasheff(&args).is_zero(), "{:?}", args);
            }
        }
    }
}

#[test]
fn shuffle_relation_arity_three() {
    let basis = DupontForm::basis(2);
    for a in &basis {
        for b in &basis {
            for c in &basis {
                assert!(shuffle_3(a, b, c).is_zero(), "{:?}, {:?}, {:?}", a, b, c);
            }
        }
    }
}

#[test]
fn stasheff_relation_arity_four() {
    let quadruples = [
        ["0|1", "0|1", "1|2", "1|2"],
        ["0", "0|1", "1", "1|2"],
        ["0|1", "2", "0|2", "1"],
        ["0|2", "0|1", "1|2", "0"],
    ];
    for keys in quadruples {
        let args = keys.map(w);
        assert!(stasheff(&args).is_zero(), "{:?}", keys);
    }
}

#[test]
fn binary_product_is_projected_wedge() {
    let basis = DupontForm::basis(2);
    for a in &basis {
        for b in &basis {
            let expected = a.i().try_mul(&b.i()).unwrap().p();
            let m2 = DupontForm::a_infinity_product(&[a.clone(), b.clone()]).unwrap();
            assert_eq!(m2, expected);
            let corolla = DupontForm::tree_product(&Tree::node([a.clone(), b.clone()])).unwrap();
            assert_eq!(corolla, expected);
        }
    }
}

#[test]
fn unit_is_strict_for_binary_product() {
    let one = DupontForm::one(2);
    for a in DupontForm::basis(2) {
        assert_eq!(DupontForm::a_infinity_product(&[one.clone(), a.clone()]).unwrap(), a);
        assert_eq!(DupontForm::a_infinity_product(&[a.clone(), one.clone()]).unwrap(), a);
    }
}

#[test]
fn known_values() {
    let m3 = DupontForm::a_infinity_product(&[w("0|1"), w("0|1"), w("1")]).unwrap();
    assert_eq!(m3, w("0|1").scale(&Rational::from((-1, 12))));

    let m4 = DupontForm::a_infinity_product(&[w("0|1"), w("0|1"), w("1|2"), w("1|2")]).unwrap();
    assert_eq!(m4, w("0|1|2").scale(&Rational::from((-1, 540))));
}
