//! Stream locator construction
//!
//! The transport only understands URLs. Turning a track id into one needs
//! provider details (base URL, client credential) that live outside the
//! playback core, so the mapping is a trait.

use encore_core::TrackId;
use url::Url;

use crate::error::{PlaybackError, Result};

/// Builds the URL a transport should load for a track
pub trait LocatorBuilder: Send + Sync {
    /// Build the stream locator for `track_id`
    fn build_locator(&self, track_id: &TrackId) -> Result<Url>;
}

impl<F> LocatorBuilder for F
where
    F: Fn(&TrackId) -> Result<Url> + Send + Sync,
{
    fn build_locator(&self, track_id: &TrackId) -> Result<Url> {
        self(track_id)
    }
}

/// Provider streaming endpoint
///
/// Produces `{base_url}/tracks/{id}/stream?client_id={client_id}`.
#[derive(Debug, Clone)]
pub struct StreamEndpoint {
    base_url: Url,
    client_id: String,
}

impl StreamEndpoint {
    /// Create an endpoint from a base URL and client credential
    pub fn new(base_url: &str, client_id: impl Into<String>) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(PlaybackError::InvalidLocator(format!(
                "{} cannot be used as a base URL",
                base_url
            )));
        }

        Ok(Self {
            base_url,
            client_id: client_id.into(),
        })
    }

    /// Base URL streams are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

impl LocatorBuilder for StreamEndpoint {
    fn build_locator(&self, track_id: &TrackId) -> Result<Url> {
        if track_id.as_str().is_empty() {
            return Err(PlaybackError::InvalidLocator("empty track id".to_string()));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| PlaybackError::InvalidLocator(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["tracks", track_id.as_str(), "stream"]);
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id);

        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_stream_url() {
        let endpoint = StreamEndpoint::new("https://api.soundcloud.com", "abc123").unwrap();
        let url = endpoint.build_locator(&TrackId::new("13158665")).unwrap();

        assert_eq!(
            url.as_str(),
            "https://api.soundcloud.com/tracks/13158665/stream?client_id=abc123"
        );
    }

    #[test]
    fn keeps_base_path_with_or_without_trailing_slash() {
        for base in ["https://example.com/v1", "https://example.com/v1/"] {
            let endpoint = StreamEndpoint::new(base, "id").unwrap();
            let url = endpoint.build_locator(&TrackId::new("7")).unwrap();
            assert_eq!(url.as_str(), "https://example.com/v1/tracks/7/stream?client_id=id");
        }
    }

    #[test]
    fn escapes_track_id_and_credential() {
        let endpoint = StreamEndpoint::new("https://example.com", "a&b").unwrap();
        let url = endpoint.build_locator(&TrackId::new("x/y")).unwrap();

        assert_eq!(url.path(), "/tracks/x%2Fy/stream");
        assert_eq!(url.query(), Some("client_id=a%26b"));
    }

    #[test]
    fn rejects_unusable_input() {
        assert!(matches!(
            StreamEndpoint::new("not a url", "id"),
            Err(PlaybackError::Url(_))
        ));
        assert!(matches!(
            StreamEndpoint::new("mailto:someone@example.com", "id"),
            Err(PlaybackError::InvalidLocator(_))
        ));

        let endpoint = StreamEndpoint::new("https://example.com", "id").unwrap();
        assert!(endpoint.build_locator(&TrackId::new("")).is_err());
    }

    #[test]
    fn closures_are_locator_builders() {
        let builder = |id: &TrackId| -> Result<Url> {
            Ok(Url::parse(&format!("file:///music/{}.mp3", id))?)
        };

        let url = builder.build_locator(&TrackId::new("song")).unwrap();
        assert_eq!(url.as_str(), "file:///music/song.mp3");
    }
}
