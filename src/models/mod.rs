pub mod conference;
pub mod profile;

pub use conference::{Conference, ConferenceForm};
pub use profile::{Profile, ProfileForm, TeeShirtSize, default_display_name};
