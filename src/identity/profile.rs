//! Spotify `/v1/me` payloads and their normalized identity form.

// self
use crate::_prelude::*;

/// Image descriptor attached to a provider profile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileImage {
	/// Image location; kept absent rather than rejecting the profile when the provider
	/// sends `null`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub url: Option<String>,
	/// Image height in pixels, when known.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub height: Option<u32>,
	/// Image width in pixels, when known.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub width: Option<u32>,
}

/// Profile payload returned by the provider's current-user endpoint.
///
/// Only the fields the bridge maps are modelled; everything else is ignored.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct RawProfile {
	/// Provider user identifier.
	pub id: String,
	/// Display name chosen by the user.
	#[serde(default)]
	pub display_name: Option<String>,
	/// Web API link to the user resource.
	#[serde(default)]
	pub href: Option<String>,
	/// Account email, when the `user-read-email` scope was granted.
	#[serde(default)]
	pub email: Option<String>,
	/// Avatar images, largest first.
	#[serde(default)]
	pub images: Option<Vec<ProfileImage>>,
}

/// Provider-specific metadata stored alongside the normalized profile.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppMetadata {
	/// Link to the user resource at the provider.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub spotify_link: Option<String>,
}

/// Identity record produced from a [`RawProfile`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedProfile {
	/// Always equal to the provider identifier.
	pub user_id: String,
	/// Display name, when the provider supplied one.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Always equal to the provider identifier.
	pub nickname: String,
	/// Provider metadata.
	pub app_metadata: AppMetadata,
	/// Email address, when present and non-empty.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
	/// Present iff `email` is; always `false` since provider verification is not trusted.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub email_verified: Option<bool>,
	/// First profile image, when the provider returned any.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub picture: Option<ProfileImage>,
}
impl NormalizedProfile {
	/// Returns the picture location, if a picture with a URL is present.
	pub fn picture_url(&self) -> Option<&str> {
		self.picture.as_ref().and_then(|image| image.url.as_deref())
	}
}
impl From<RawProfile> for NormalizedProfile {
	fn from(raw: RawProfile) -> Self {
		let RawProfile { id, display_name, href, email, images } = raw;
		let email = email.filter(|value| !value.is_empty());
		let email_verified = email.as_ref().map(|_| false);
		let picture = images.and_then(|images| images.into_iter().next());

		Self {
			user_id: id.clone(),
			name: display_name,
			nickname: id,
			app_metadata: AppMetadata { spotify_link: href },
			email,
			email_verified,
			picture,
		}
	}
}
