pub mod signup;
pub mod site;

pub use signup::{
    BillingForm,
    ConfirmationRequest,
    ConfirmationResponse,
    OrganizationForm,
    PackageSelection,
    SignupSummary,
    TechnicalForm,
};

pub use site::{Brand, SiteSettings};
