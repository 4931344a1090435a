// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub trait IdentifierMarkerName: Copy {
    const NAME: &'static str;
}

/// A numeric identifier tagged with the kind of thing it identifies.
#[repr(transparent)]
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier<I, U>(I, core::marker::PhantomData<U>);

impl<I, U> Identifier<I, U> {
    #[inline]
    pub const fn new(id: I) -> Self {
        Self(id, core::marker::PhantomData)
    }

    #[inline]
    pub fn value(&self) -> &I {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> I {
        self.0
    }
}

impl<I, U> std::fmt::Display for Identifier<I, U>
where
    I: std::fmt::Display,
    U: IdentifierMarkerName,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", U::NAME, self.0)
    }
}

impl<I: Serialize, U> Serialize for Identifier<I, U> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de, I: Deserialize<'de>, U> Deserialize<'de> for Identifier<I, U> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        I::deserialize(deserializer).map(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    struct ThingMarker;

    impl IdentifierMarkerName for ThingMarker {
        const NAME: &'static str = "ThingId";
    }

    type ThingId = Identifier<u64, ThingMarker>;

    #[test]
    fn test_display_uses_marker_name() {
        assert_eq!(format!("{}", ThingId::new(7)), "ThingId(7)");
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = ThingId::new(42);
        assert_eq!(serde_json::to_string(&id).unwrap(), "42");
        let back: ThingId = serde_json::from_str("42").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_ordering_follows_inner_value() {
        assert!(ThingId::new(1) < ThingId::new(2));
        assert_eq!(*ThingId::new(3).value(), 3);
        assert_eq!(ThingId::new(3).into_inner(), 3);
    }
}
