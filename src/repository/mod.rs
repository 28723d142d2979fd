pub mod conferences;
pub mod profiles;

pub use conferences::ConferenceRepository;
pub use profiles::ProfileRepository;
