use askama::Template;

/// The request-code and verify-code page shown to unauthenticated callers.
#[derive(Template)]
#[template(path = "challenge.html")]
pub struct ChallengePage<'a> {
    pub auth_prefix: &'a str,
    /// Where to send the browser after a successful verification.
    pub return_to: &'a str,
    pub code_length: usize,
}
