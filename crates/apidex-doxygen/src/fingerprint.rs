//! Source fingerprints for artifact staleness checks.

use std::hash::Hasher;

use siphasher::sip::SipHasher24;

/// Accumulates a fingerprint over named inputs.
///
/// Names and contents are length-prefixed so moving bytes between adjacent inputs
/// changes the result.
#[derive(Debug, Default)]
pub struct Fingerprint {
    /// Running hash state.
    hasher: SipHasher24,
}

impl Fingerprint {
    /// Creates an empty fingerprint.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one named input.
    pub fn add(&mut self, name: &str, contents: &[u8]) {
        self.hasher.write_usize(name.len());
        self.hasher.write(name.as_bytes());
        self.hasher.write_usize(contents.len());
        self.hasher.write(contents);
    }

    /// Returns the fingerprint as a hex string.
    pub fn finish(&self) -> String {
        format!("{:016x}", self.hasher.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn of(inputs: &[(&str, &str)]) -> String {
        let mut fp = Fingerprint::new();
        for (name, contents) in inputs {
            fp.add(name, contents.as_bytes());
        }
        fp.finish()
    }

    #[test]
    fn same_inputs_same_fingerprint() {
        let a = of(&[("functions_0.js", "[]"), ("classes_0.js", "[]")]);
        let b = of(&[("functions_0.js", "[]"), ("classes_0.js", "[]")]);
        assert_eq!(a, b);
        assert_eq!(a.len(), 16);
    }

    #[test]
    fn content_name_and_boundaries_matter() {
        let base = of(&[("a.js", "xy"), ("b.js", "z")]);
        assert_ne!(base, of(&[("a.js", "xy"), ("b.js", "w")]));
        assert_ne!(base, of(&[("a.js", "xy"), ("c.js", "z")]));
        assert_ne!(base, of(&[("a.js", "x"), ("b.js", "yz")]));
    }
}
