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
use std::{borrow::Borrow, hash::Hash, marker::PhantomData};

pub trait TextMarkerName {
    const NAME: &'static str;
}

/// Free text folded into a comparison key.
///
/// Leading and trailing whitespace is removed and the text is upper-cased, so
/// `" calle 10 # 4-21 "` and `"CALLE 10 # 4-21"` compare equal. The marker
/// keeps cities, addresses and reference codes from being mixed up.
#[must_use]
pub struct Normalized<U>(String, PhantomData<U>);

impl<U> Normalized<U> {
    #[inline]
    pub fn new(raw: &str) -> Self {
        Self(normalize_key(raw), PhantomData)
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_inner(self) -> String {
        self.0
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Trims and upper-cases `raw`.
#[inline]
pub fn normalize_key(raw: &str) -> String {
    raw.trim().to_uppercase()
}

impl<U> Clone for Normalized<U> {
    #[inline]
    fn clone(&self) -> Self {
        Self(self.0.clone(), PhantomData)
    }
}

impl<U> PartialEq for Normalized<U> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<U> Eq for Normalized<U> {}

impl<U> PartialOrd for Normalized<U> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<U> Ord for Normalized<U> {
    #[inline]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0)
    }
}

impl<U> Hash for Normalized<U> {
    #[inline]
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state)
    }
}

impl<U> Borrow<str> for Normalized<U> {
    #[inline]
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl<U> AsRef<str> for Normalized<U> {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<U> From<&str> for Normalized<U> {
    #[inline]
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl<U> From<String> for Normalized<U> {
    #[inline]
    fn from(raw: String) -> Self {
        Self::new(&raw)
    }
}

impl<U: TextMarkerName> std::fmt::Debug for Normalized<U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({:?})", U::NAME, self.0)
    }
}

impl<U> std::fmt::Display for Normalized<U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<U> Serialize for Normalized<U> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de, U> Deserialize<'de> for Normalized<U> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::new(&raw))
    }
}
