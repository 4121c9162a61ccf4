use serde::ser::{
    SerializeStruct,
    Serializer,
};

/// Read-only view of a single completed listen, independent of where it was loaded from
pub trait ListenData {
    fn listened_at(&self) -> i64;

    fn track_name(&self) -> &str;
    fn artist_name(&self) -> &str;

    fn release_name(&self) -> Option<&str> { None }
}

impl<L: ListenData + ?Sized> ListenData for &L {
    #[inline]
    fn listened_at(&self) -> i64 { (**self).listened_at() }

    #[inline]
    fn track_name(&self) -> &str { (**self).track_name() }

    #[inline]
    fn artist_name(&self) -> &str { (**self).artist_name() }

    #[inline]
    fn release_name(&self) -> Option<&str> { (**self).release_name() }
}


/// Serializes any [`ListenData`] in the shape of a `ListenBrainz` import listen:
///
/// `{"listened_at":..,"track_metadata":{"track_name":..,"artist_name":..,"release_name":..}}`
///
/// `release_name` is omitted when the listen has none.
pub struct ListenPayload<'l, L: ?Sized>(pub &'l L);

impl<L: ListenData + ?Sized> serde::Serialize for ListenPayload<'_, L> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("listen", 2)?;
        state.serialize_field("listened_at", &self.0.listened_at())?;
        state.serialize_field("track_metadata", &TrackMetadata(self.0))?;
        state.end()
    }
}

struct TrackMetadata<'l, L: ?Sized>(&'l L);

impl<L: ListenData + ?Sized> serde::Serialize for TrackMetadata<'_, L> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("track_metadata", 3)?;
        state.serialize_field("track_name", self.0.track_name())?;
        state.serialize_field("artist_name", self.0.artist_name())?;
        if let Some(release) = self.0.release_name() {
            state.serialize_field("release_name", release)?;
        } else {
            state.skip_field("release_name")?;
        }
        state.end()
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    struct Simple {
        release: Option<&'static str>,
    }

    impl ListenData for Simple {
        fn listened_at(&self) -> i64 { 1_669_318_360 }

        fn track_name(&self) -> &str { "Angel With A Shotgun" }

        fn artist_name(&self) -> &str { "The Cab" }

        fn release_name(&self) -> Option<&str> { self.release }
    }

    #[test]
    fn test_ser_with_release() {
        let listen = Simple {
            release: Some("Symphony Soldier"),
        };
        let json = serde_json::to_string(&ListenPayload(&listen)).expect("Failed to serialize listen");
        assert_eq!(
            json,
            r#"{"listened_at":1669318360,"track_metadata":{"track_name":"Angel With A Shotgun","artist_name":"The Cab","release_name":"Symphony Soldier"}}"#
        );
    }

    #[test]
    fn test_ser_without_release() {
        let listen = Simple { release: None };
        let json = serde_json::to_string(&ListenPayload(&&listen)).expect("Failed to serialize listen");
        assert_eq!(
            json,
            r#"{"listened_at":1669318360,"track_metadata":{"track_name":"Angel With A Shotgun","artist_name":"The Cab"}}"#
        );
    }
}
