//! Integration tests for the record model: entries and vault mutations.

use lockbox::crypto::{Salt, SALT_LEN};
use lockbox::vault::{Entry, EntryFields, Vault};

fn new_vault() -> Vault {
    Vault::new(Salt::from_bytes([5u8; SALT_LEN]))
}

fn fields(title: &str, username: &str, url: &str, notes: &str) -> EntryFields {
    EntryFields {
        title: title.into(),
        username: username.into(),
        password: "p4ss".into(),
        url: url.into(),
        notes: notes.into(),
    }
}

// ---------------------------------------------------------------------------
// Entry lifecycle
// ---------------------------------------------------------------------------

#[test]
fn add_then_get_returns_matching_fields() {
    let mut vault = new_vault();
    let entry = Entry::new(fields("Email", "me@x.com", "https://mail.x.com", ""));
    let id = entry.id().to_string();
    vault.add_entry(entry);

    let got = vault.get_entry(&id).expect("entry should exist");
    assert_eq!(got.title, "Email");
    assert_eq!(got.username, "me@x.com");
    assert_eq!(got.password, "p4ss");
    assert_eq!(got.url, "https://mail.x.com");
    assert!(got.updated_at() >= got.created_at());
}

#[test]
fn update_rewrites_fields_and_bumps_updated_at() {
    let mut vault = new_vault();
    let entry = Entry::new(fields("Email", "me@x.com", "", ""));
    let id = entry.id().to_string();
    let created = entry.created_at();
    vault.add_entry(entry);

    let mut changed = vault.get_entry(&id).unwrap().fields();
    changed.password = "n3w-p4ss".into();
    assert!(vault.update_entry(&id, changed));

    let got = vault.get_entry(&id).unwrap();
    assert_eq!(got.password, "n3w-p4ss");
    assert_eq!(got.title, "Email");
    assert_eq!(got.username, "me@x.com");
    assert_eq!(got.id(), id);
    assert_eq!(got.created_at(), created);
    assert!(got.updated_at() > created);
}

#[test]
fn repeated_updates_keep_increasing_updated_at() {
    let mut vault = new_vault();
    let entry = Entry::new(fields("a", "", "", ""));
    let id = entry.id().to_string();
    vault.add_entry(entry);

    let mut last = vault.get_entry(&id).unwrap().updated_at();
    for i in 0..20 {
        vault.update_entry(&id, fields(&format!("a{i}"), "", "", ""));
        let now = vault.get_entry(&id).unwrap().updated_at();
        assert!(now > last);
        last = now;
    }
}

#[test]
fn update_unknown_id_returns_false() {
    let mut vault = new_vault();
    vault.add_entry(Entry::new(fields("a", "", "", "")));
    let before = vault.clone();

    assert!(!vault.update_entry("0000000000000000", fields("b", "", "", "")));
    assert_eq!(vault, before);
}

#[test]
fn delete_then_get_is_absent() {
    let mut vault = new_vault();
    let entry = Entry::new(fields("a", "", "", ""));
    let id = entry.id().to_string();
    vault.add_entry(entry);

    assert!(vault.delete_entry(&id));
    assert!(vault.get_entry(&id).is_none());
    assert!(vault.is_empty());
}

#[test]
fn delete_unknown_id_leaves_vault_unchanged() {
    let mut vault = new_vault();
    vault.add_entry(Entry::new(fields("a", "", "", "")));
    vault.add_entry(Entry::new(fields("b", "", "", "")));
    let before = vault.clone();

    assert!(!vault.delete_entry("does-not-exist"));
    assert_eq!(vault, before);
}

#[test]
fn entry_ids_are_unique_across_many_entries() {
    let mut vault = new_vault();
    for i in 0..500 {
        vault.add_entry(Entry::new(fields(&format!("e{i}"), "", "", "")));
    }
    let mut ids: Vec<_> = vault.entries().iter().map(|e| e.id().to_string()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 500);
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[test]
fn empty_query_returns_everything_in_order() {
    let mut vault = new_vault();
    for title in ["zulu", "alpha", "mike"] {
        vault.add_entry(Entry::new(fields(title, "", "", "")));
    }

    let titles: Vec<_> = vault
        .search_entries("")
        .iter()
        .map(|e| e.title.clone())
        .collect();
    assert_eq!(titles, ["zulu", "alpha", "mike"]);
}

#[test]
fn search_is_case_insensitive_substring() {
    let mut vault = new_vault();
    vault.add_entry(Entry::new(fields("gmail account", "", "", "")));
    vault.add_entry(Entry::new(fields("bank", "", "", "")));

    let hits = vault.search_entries("GMAIL");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "gmail account");
}

#[test]
fn search_matches_any_of_title_username_url_notes() {
    let mut vault = new_vault();
    vault.add_entry(Entry::new(fields("one", "Shared-Login", "", "")));
    vault.add_entry(Entry::new(fields("two", "", "https://SHARED.example", "")));
    vault.add_entry(Entry::new(fields("three", "", "", "the shared family pc")));
    vault.add_entry(Entry::new(fields("four", "solo", "", "")));

    let titles: Vec<_> = vault
        .search_entries("shared")
        .iter()
        .map(|e| e.title.clone())
        .collect();
    assert_eq!(titles, ["one", "two", "three"]);
}

#[test]
fn debug_output_of_vault_hides_passwords() {
    let mut vault = new_vault();
    vault.add_entry(Entry::new(fields("Email", "me@x.com", "", "")));

    let rendered = format!("{vault:?}");
    assert!(rendered.contains("me@x.com"));
    assert!(!rendered.contains("p4ss"));
}

#[test]
fn search_does_not_match_passwords() {
    let mut vault = new_vault();
    vault.add_entry(Entry::new(fields("a", "", "", "")));
    assert!(vault.search_entries("p4ss").is_empty());
}
