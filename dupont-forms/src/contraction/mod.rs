//! The Dupont contraction between Sullivan forms and Dupont forms.
//!
//! The three maps
//!
//! - [`DupontForm::i`]: `C_n → Ω_n`, the inclusion of cochains as Whitney forms,
//! - [`SullivanForm::p`]: `Ω_n → C_n`, integration over the faces of the simplex,
//! - [`SullivanForm::h`]: `Ω_n → Ω_n`, the Dupont homotopy of degree `-1`,
//!
//! satisfy `p ∘ i = id` and `i ∘ p - id = d ∘ h + h ∘ d`, together with the side conditions
//! `h ∘ i = 0`, `p ∘ h = 0` and `h ∘ h = 0`. They are defined on representations, but agree on
//! representations of the same form, so they may be applied to unreduced forms.
//!
//! [`DupontForm::i`]: crate::DupontForm::i
//! [`SullivanForm::p`]: crate::SullivanForm::p
//! [`SullivanForm::h`]: crate::SullivanForm::h

mod homotopy;
mod inclusion;
mod projection;
