pub mod home;
pub mod lead_detail;
pub mod leads;
pub mod thanks;
pub mod valuation;

pub use home::home_page;
pub use lead_detail::{lead_detail_page, LeadDetailVm};
pub use leads::{leads_page, LeadsVm};
pub use thanks::thanks_page;
pub use valuation::valuation_page;
