//! `codegen!` expands an SM83 opcode table into the CPU's dispatch functions.
//!
//! ```rust,ignore
//! impl Cpu {
//!     codegen!("utils/instr.json");
//! }
//! ```
//!
//! The path is relative to the invoking crate's manifest directory. The
//! expansion defines `execute_unprefixed` and `execute_prefixed`; every
//! handler and accessor they call must exist on the surrounding type.

use std::path::PathBuf;

use proc_macro::{Span, TokenStream, TokenTree};

use gbdispatch::EmitConfig;

struct Error {
    message: String,
    span: Span,
}

impl Error {
    fn new(span: Span, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }

    fn into_compile_error(self) -> TokenStream {
        let code = format!("compile_error!({:?});", self.message);
        match code.parse::<TokenStream>() {
            Ok(ts) => ts
                .into_iter()
                .map(|mut tt| {
                    tt.set_span(self.span);
                    tt
                })
                .collect(),
            Err(_) => TokenStream::new(),
        }
    }
}

fn parse_path(input: TokenStream) -> Result<(String, Span), Error> {
    let mut tokens = input.into_iter();
    let tt = tokens
        .next()
        .ok_or_else(|| Error::new(Span::call_site(), "expected opcode table path"))?;
    let TokenTree::Literal(lit) = &tt else {
        return Err(Error::new(tt.span(), "expected string literal"));
    };
    let raw = lit.to_string();
    let path = raw
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| raw.strip_prefix("r\"").and_then(|s| s.strip_suffix('"')))
        .ok_or_else(|| Error::new(tt.span(), "expected string literal"))?;
    if path.contains('\\') {
        return Err(Error::new(tt.span(), "escapes are not supported in the table path"));
    }
    if let Some(extra) = tokens.next() {
        return Err(Error::new(extra.span(), "unexpected tokens after table path"));
    }
    Ok((path.to_owned(), tt.span()))
}

fn expand(input: TokenStream) -> Result<TokenStream, Error> {
    let (path, span) = parse_path(input)?;
    let root = std::env::var("CARGO_MANIFEST_DIR")
        .map_err(|e| Error::new(span, format!("CARGO_MANIFEST_DIR: {}", e)))?;
    let full = PathBuf::from(root).join(&path);
    let code = gbdispatch::generate(&full, &EmitConfig::default())
        .map_err(|e| Error::new(span, format!("{}: {}", full.display(), e)))?;
    code.parse()
        .map_err(|e| Error::new(span, format!("generated code does not parse: {}", e)))
}

#[proc_macro]
pub fn codegen(input: TokenStream) -> TokenStream {
    match expand(input) {
        Ok(ts) => ts,
        Err(err) => err.into_compile_error(),
    }
}
