use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

fn store_path(test: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "rusty_phonebook_{test}_{}.json",
        std::process::id()
    ))
}

fn phonebook(path: &Path) -> Command {
    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    cmd.env("STORAGE_CHOICE", "json")
        .env("JSON_STORAGE_PATH", path);
    cmd
}

fn seed_bob(path: &Path) {
    phonebook(path)
        .write_stdin("1\nBob\nmobile\n0123456789\nn\nbob@example.com\n9\n")
        .assert()
        .success();
}

#[test]
fn update_number_then_find_by_phone() {
    let path = store_path("edit_number");
    let _ = fs::remove_file(&path);
    seed_bob(&path);

    // 5 = update; [u]pdate the mobile label, then quit, keep email
    phonebook(&path)
        .write_stdin("5\nBob\nu\nmobile\n999\nq\n\n9\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Contact 'Bob' updated successfully!"));

    phonebook(&path)
        .write_stdin("4\n999\n9\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Found: Name: Bob, Label: mobile, Phone: 999, Email: bob@example.com",
        ));

    // The old number no longer matches anything
    phonebook(&path)
        .write_stdin("4\n0123456789\n9\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Phone number '0123456789' Not found"));

    let _ = fs::remove_file(&path);
}

#[test]
fn find_by_name_is_exact_and_case_sensitive() {
    let path = store_path("edit_find_name");
    let _ = fs::remove_file(&path);
    seed_bob(&path);

    phonebook(&path)
        .write_stdin("3\nBob\n9\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Name: Bob"));

    phonebook(&path)
        .write_stdin("3\nbob\n9\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Contact 'bob' Not found"));

    let _ = fs::remove_file(&path);
}

#[test]
fn non_digit_number_rejected_during_update() {
    let path = store_path("edit_bad_number");
    let _ = fs::remove_file(&path);
    seed_bob(&path);

    // First attempt uses a bad number and is rejected at the prompt;
    // the second goes through
    phonebook(&path)
        .write_stdin("5\nBob\nu\nmobile\nabc\nu\nmobile\n777\nq\n\n9\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("digits only"))
        .stdout(predicate::str::contains("Contact 'Bob' updated successfully!"));

    phonebook(&path)
        .write_stdin("4\n777\n9\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Found: Name: Bob"));

    let _ = fs::remove_file(&path);
}

#[test]
fn deleting_last_number_offers_contact_deletion() {
    let path = store_path("edit_no_phones");
    let _ = fs::remove_file(&path);
    seed_bob(&path);

    // Delete the only label, keep email, confirm the cleanup offer
    phonebook(&path)
        .write_stdin("5\nBob\nd\nmobile\nq\n\ny\n9\n")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Contact 'Bob' has no phone numbers left!")
                .and(predicate::str::contains(
                    "Contact 'Bob' deleted because it had no numbers.",
                )),
        );

    phonebook(&path)
        .write_stdin("3\nBob\n9\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Contact 'Bob' Not found"));

    let _ = fs::remove_file(&path);
}

#[test]
fn declining_cleanup_keeps_the_phoneless_contact() {
    let path = store_path("edit_keep_phoneless");
    let _ = fs::remove_file(&path);
    seed_bob(&path);

    phonebook(&path)
        .write_stdin("5\nBob\nd\nmobile\nq\n\nn\n9\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Contact 'Bob' has no phone numbers left!"));

    phonebook(&path)
        .write_stdin("3\nBob\n9\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Phones: []"));

    let _ = fs::remove_file(&path);
}

#[test]
fn updating_unknown_contact_is_not_found() {
    let path = store_path("edit_unknown");
    let _ = fs::remove_file(&path);

    phonebook(&path)
        .write_stdin("5\nGhost\n9\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Contact 'Ghost' Not found"));
}
