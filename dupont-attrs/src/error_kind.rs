use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{meta::ParseNestedMeta, Data, DeriveInput, Expr, Ident, Result};

/// The tags of the `error` attribute. Each holds an expression evaluated with `self` in scope.
#[derive(Default)]
struct ErrorArgs {
    message: Option<Expr>,
    labels: Option<Expr>,
    help: Option<Expr>,
}

impl ErrorArgs {
    /// Reads one `tag = expr` pair of the attribute.
    fn parse_tag(&mut self, meta: ParseNestedMeta) -> Result<()> {
        let slot = if meta.path.is_ident("message") {
            &mut self.message
        } else if meta.path.is_ident("labels") {
            &mut self.labels
        } else if meta.path.is_ident("help") {
            &mut self.help
        } else {
            return Err(meta.error("unknown tag, expected `message`, `labels` or `help`"));
        };

        if slot.is_some() {
            return Err(meta.error("this tag was already given"));
        }
        *slot = Some(meta.value()?.parse()?);
        Ok(())
    }
}

/// The message used when none is given: the struct name split into lowercase words, so that
/// `NoArguments` reads `no arguments`.
fn default_message(name: &Ident) -> String {
    let mut message = String::new();
    for (i, c) in name.to_string().chars().enumerate() {
        if i > 0 && c.is_uppercase() {
            message.push(' ');
        }
        message.extend(c.to_lowercase());
    }
    message
}

/// Expands `#[derive(ErrorKind)]` for the given struct.
pub fn expand(input: DeriveInput) -> Result<TokenStream2> {
    let name = &input.ident;
    if !matches!(input.data, Data::Struct(_)) {
        return Err(syn::Error::new_spanned(name, "`ErrorKind` can only be derived for structs"));
    }
    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(&input.generics, "`ErrorKind` cannot be derived for generic structs"));
    }

    let mut args = ErrorArgs::default();
    for attr in input.attrs.iter().filter(|attr| attr.path().is_ident("error")) {
        attr.parse_nested_meta(|meta| args.parse_tag(meta))?;
    }

    let message = match &args.message {
        Some(expr) => quote! { (#expr).to_string() },
        None => {
            let message = default_message(name);
            quote! { #message.to_string() }
        },
    };
    let labels = match &args.labels {
        Some(expr) => quote! {
            (#expr).into_iter().map(|label| label.to_string()).collect::<Vec<String>>()
        },
        None => quote! { Vec::<String>::new() },
    };
    let help = args.help.as_ref().map(|expr| quote! { report.set_help(#expr); });

    // spans beyond the last label are still highlighted, without a message
    Ok(quote! {
        impl dupont_error::ErrorKind for #name {
            fn as_any(&self) -> &dyn std::any::Any {
                self
            }

            fn message(&self) -> String {
                #message
            }

            fn build_report<'a>(
                &self,
                src_id: &'a str,
                spans: &[std::ops::Range<usize>],
            ) -> ariadne::Report<(&'a str, std::ops::Range<usize>)> {
                let mut labels = #labels.into_iter();
                let offset = spans.first().map_or(0, |span| span.start);
                let mut report = ariadne::Report::build(ariadne::ReportKind::Error, src_id, offset)
                    .with_message(dupont_error::ErrorKind::message(self));

                for span in spans {
                    let label = ariadne::Label::new((src_id, span.clone()))
                        .with_color(dupont_error::EXPR);
                    report.add_label(match labels.next() {
                        Some(text) if !text.is_empty() => label.with_message(text),
                        _ => label,
                    });
                }

                #help
                report.finish()
            }
        }
    })
}
