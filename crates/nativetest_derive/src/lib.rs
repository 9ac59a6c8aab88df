//! Test registration attribute for nativetest extension modules.
//!
//! `#[native_test]` turns a plain Rust function into a C-callable test entry point that can be listed in
//! `nativetest_abi::export_tests!`.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{ItemFn, ReturnType, parse_macro_input};

/// Registers a function as a native test entry point.
///
/// The function must take no arguments and return either `()` or `Result<(), E>` with `E: Display`. It is
/// rewritten into `extern "C" fn name() -> c_int` that runs the original body through
/// `nativetest_abi::run_test`, so panics are caught and reported as a failing status.
///
/// # Example
/// ```ignore
/// #[native_test]
/// fn test_roundtrip() -> Result<(), String> {
///     let n: i32 = "42".parse().map_err(|e| format!("{e}"))?;
///     nativetest_abi::assert_eq(n, 42);
///     Ok(())
/// }
///
/// // Generates:
/// pub extern "C" fn test_roundtrip() -> ::core::ffi::c_int {
///     fn body() -> Result<(), String> { /* original body */ }
///     ::nativetest_abi::run_test("test_roundtrip", body)
/// }
/// ```
#[proc_macro_attribute]
pub fn native_test(attr: TokenStream, item: TokenStream) -> TokenStream {
    if !attr.is_empty() {
        let attr = TokenStream2::from(attr);
        return syn::Error::new_spanned(attr, "#[native_test] takes no arguments")
            .to_compile_error()
            .into();
    }

    let func = parse_macro_input!(item as ItemFn);
    match expand(func) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(func: ItemFn) -> syn::Result<TokenStream2> {
    let sig = &func.sig;
    if !sig.inputs.is_empty() {
        return Err(syn::Error::new_spanned(&sig.inputs, "native tests take no arguments"));
    }
    if let Some(asyncness) = &sig.asyncness {
        return Err(syn::Error::new_spanned(asyncness, "native tests cannot be async"));
    }
    if !sig.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(&sig.generics, "native tests cannot be generic"));
    }
    if sig.abi.is_some() {
        return Err(syn::Error::new_spanned(&sig.abi, "remove the ABI; #[native_test] adds `extern \"C\"`"));
    }

    let name = &sig.ident;
    let name_str = name.to_string();
    let vis = &func.vis;
    let attrs = &func.attrs;
    let block = &func.block;
    let output = match &sig.output {
        ReturnType::Default => quote!(),
        ReturnType::Type(arrow, ty) => quote!(#arrow #ty),
    };

    Ok(quote! {
        #(#attrs)*
        #vis extern "C" fn #name() -> ::core::ffi::c_int {
            fn body() #output #block
            ::nativetest_abi::run_test(#name_str, body)
        }
    })
}
