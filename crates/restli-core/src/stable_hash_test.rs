use super::sha256_hex;

#[test]
fn part_boundaries_change_the_digest() {
    let joined = sha256_hex(&[b"ab", b"c"]);
    let split = sha256_hex(&[b"a", b"bc"]);
    assert_ne!(joined, split);
    assert_eq!(joined, sha256_hex(&[b"ab", b"c"]));
    assert_eq!(joined.len(), 64);
}
