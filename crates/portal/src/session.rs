use atelier_models::UserProfile;

/// The authenticated identity for the lifetime of a sign-in. Holds the
/// provider's opaque access token; claims are never decoded locally.
#[derive(Debug, Clone)]
pub struct Session {
    pub profile: UserProfile,
    pub access_token: String,
}
