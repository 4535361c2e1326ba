/*!
Process-wide string interning.

Every byte sequence that flows into a [Term](crate::ast::Term) goes through
[encode], which hands back a small `Copy` handle ([Str]). Two handles compare
equal iff they were produced by encoding the same bytes — identity stands in
for structural equality everywhere downstream, which is the whole point:
the rest of the crate never compares byte slices again.

The table is a process-lifetime singleton behind a [Mutex], per the
single-threaded-core / concurrent-table design noted for this crate: nothing
else here needs synchronization, so promoting just the table keeps the rest
of the API lock-free.
*/

use std::sync::{Mutex, OnceLock};

/// A handle to an interned byte sequence. Equality is identity: two handles
/// are equal iff they index the same table slot.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Str(u32);

const HASH_RANGE: usize = 256;
const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    for b in bytes {
        hash ^= *b as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

struct Table {
    /// Bucket `h % HASH_RANGE` holds the arena indices of every string whose
    /// hash falls in that bucket, in insertion order.
    buckets: Vec<Vec<u32>>,
    arena: Vec<Box<[u8]>>,
}

impl Table {
    fn new() -> Self {
        let mut t = Table {
            buckets: vec![Vec::new(); HASH_RANGE],
            arena: Vec::new(),
        };
        // Sentinels, per the data model: the empty string and a bare newline.
        t.insert(b"");
        t.insert(b"\n");
        t
    }

    fn insert(&mut self, bytes: &[u8]) -> Str {
        let bucket = (fnv1a(bytes) as usize) % HASH_RANGE;
        for &idx in &self.buckets[bucket] {
            if &*self.arena[idx as usize] == bytes {
                return Str(idx);
            }
        }
        let idx = self.arena.len() as u32;
        self.arena.push(bytes.to_vec().into_boxed_slice());
        self.buckets[bucket].push(idx);
        Str(idx)
    }

    fn decode(&self, s: Str) -> &[u8] {
        &self.arena[s.0 as usize]
    }
}

fn table() -> &'static Mutex<Table> {
    static TABLE: OnceLock<Mutex<Table>> = OnceLock::new();
    TABLE.get_or_init(|| Mutex::new(Table::new()))
}

/// Empty string sentinel, created at table initialization.
pub fn empty_string() -> Str {
    Str(0)
}

/// Newline sentinel, created at table initialization.
pub fn newline_string() -> Str {
    Str(1)
}

/// Interns `bytes`, returning the canonical handle for that byte sequence.
pub fn encode(bytes: &[u8]) -> Str {
    table().lock().unwrap().insert(bytes)
}

/// Interns a `&str`.
pub fn encode_str(s: &str) -> Str {
    encode(s.as_bytes())
}

/// Copies the interned bytes out as an owned `String`.
///
/// Panics if the handle's bytes are not valid UTF-8; every handle created
/// through [encode_str] satisfies this, and the surface parser never feeds
/// raw non-UTF-8 bytes into [encode].
pub fn decode(s: Str) -> String {
    let guard = table().lock().unwrap();
    String::from_utf8(guard.decode(s).to_vec()).expect("interned bytes are valid UTF-8")
}

pub fn len(s: Str) -> usize {
    table().lock().unwrap().decode(s).len()
}

/// Byte-lexicographic comparison of the decoded contents (not the handles).
pub fn cmp(a: Str, b: Str) -> std::cmp::Ordering {
    let guard = table().lock().unwrap();
    guard.decode(a).cmp(guard.decode(b))
}

/// Neither sentinel participates in ordinary string garbage collection (the
/// singleton table never tears down mid-process, so in this port the
/// predicate exists chiefly to mirror the component's documented API and to
/// let callers special-case the sentinels where useful, e.g. when printing).
pub fn is_special(s: Str) -> bool {
    s == empty_string() || s == newline_string()
}

/// Interns the concatenation of the decoded contents of `a` and `b`.
pub fn append(a: Str, b: Str) -> Str {
    let guard = table().lock().unwrap();
    let mut combined = Vec::with_capacity(guard.decode(a).len() + guard.decode(b).len());
    combined.extend_from_slice(guard.decode(a));
    combined.extend_from_slice(guard.decode(b));
    drop(guard);
    encode(&combined)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_bytes_intern_to_the_same_handle() {
        let a = encode_str("hello");
        let b = encode_str("hello");
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_bytes_intern_to_distinct_handles() {
        let a = encode_str("hello");
        let b = encode_str("world");
        assert_ne!(a, b);
    }

    #[test]
    fn decode_round_trips() {
        let a = encode_str("round trip");
        assert_eq!(decode(a), "round trip");
    }

    #[test]
    fn append_interns_the_concatenation() {
        let a = encode_str("foo");
        let b = encode_str("bar");
        let c = append(a, b);
        assert_eq!(decode(c), "foobar");
        assert_eq!(c, encode_str("foobar"));
    }

    #[test]
    fn sentinels_are_special() {
        assert!(is_special(empty_string()));
        assert!(is_special(newline_string()));
        assert!(!is_special(encode_str("x")));
    }
}
