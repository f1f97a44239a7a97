//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod device_status;
pub mod enrollment;
pub mod login;
pub mod logout;
pub mod verify_otp;

// Re-exports
pub use config::AuthConfig;
pub use device_status::{DeviceStatusUseCase, DeviceVerification, StatusOutput};
pub use enrollment::{ConfirmOutput, EnrollmentOutput, EnrollmentUseCase};
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use logout::LogoutUseCase;
pub use verify_otp::{VerifiedOutput, VerifyOtpUseCase};
