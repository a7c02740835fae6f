//! Admin-side rules: who may manage the catalogue, the new-product form and
//! its image selection.

mod draft;
mod policy;
mod selection;

pub use draft::{
    product_id_from_random, sanitize_number, sanitize_product_id, DraftError, NewProduct,
    ProductDraft, DEFAULT_MADE_YEAR, PRODUCT_ID_DIGITS, YEAR_OPTIONS,
};
pub use policy::{
    guard_route, AuthorizationPolicy, GuardDecision, Identity, SingleAdminPolicy, LOGIN_PATH,
};
pub use selection::{clamp_active, merge_selection, remove_selected};
