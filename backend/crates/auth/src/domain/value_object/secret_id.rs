use kernel::id::Id;

pub struct SecretMarker;
pub type SecretId = Id<SecretMarker>;
