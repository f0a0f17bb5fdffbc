//! The fixed interaction sequence against the PACM portal.
//!
//! The page contract below is unversioned: the remote portal can change at
//! any time and break any selector. Keeping every selector and the step
//! order in one place makes such breakage attributable to a named step.

use std::fmt;

/// Iframe on the login page that hosts the provider chooser.
pub const LOGIN_FRAME: &str = "#loginframe";
/// eRA Commons provider button inside the login iframe.
pub const ERA_LOGIN_OPTION: &str = "#era";
pub const USERNAME_FIELD: &str = "#USER";
pub const PASSWORD_FIELD: &str = "#PASSWORD";
pub const LOGIN_SUBMIT: &str = "form.nih-login-form button.nih-white-button";
/// Link from the landing page to the token display section.
pub const TOKEN_LINK_TEXT: &str = "API Token";
/// Region whose rendered text contains the `&api-token=` marker.
pub const TOKEN_SECTION: &str = "div.section-content";

/// Named steps of the refresh flow, in execution order. Failures surface
/// under these names so a broken selector points at one step, not at an
/// opaque WebDriver error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Connect,
    OpenLogin,
    EnterLoginFrame,
    ChooseEraLogin,
    LeaveLoginFrame,
    FillUsername,
    FillPassword,
    SubmitLogin,
    OpenTokenPage,
    ReadTokenSection,
}

impl Step {
    /// The full flow, in the only order it may run.
    pub const SEQUENCE: [Step; 10] = [
        Step::Connect,
        Step::OpenLogin,
        Step::EnterLoginFrame,
        Step::ChooseEraLogin,
        Step::LeaveLoginFrame,
        Step::FillUsername,
        Step::FillPassword,
        Step::SubmitLogin,
        Step::OpenTokenPage,
        Step::ReadTokenSection,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Step::Connect => "connect-webdriver",
            Step::OpenLogin => "open-login",
            Step::EnterLoginFrame => "enter-login-frame",
            Step::ChooseEraLogin => "choose-era-login",
            Step::LeaveLoginFrame => "leave-login-frame",
            Step::FillUsername => "fill-username",
            Step::FillPassword => "fill-password",
            Step::SubmitLogin => "submit-login",
            Step::OpenTokenPage => "open-token-page",
            Step::ReadTokenSection => "read-token-section",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
