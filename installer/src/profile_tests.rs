//! Unit tests for shell profile selection.

use super::*;
use rstest::{fixture, rstest};
use tempfile::TempDir;

struct Home {
    _dir: TempDir,
    path: Utf8PathBuf,
}

impl Home {
    fn bin_dir(&self) -> Utf8PathBuf {
        self.path.join(".privado").join("bin")
    }

    fn write(&self, name: &str, contents: &str) {
        fs::write(self.path.join(name), contents).expect("write profile");
    }

    fn read(&self, name: &str) -> String {
        fs::read_to_string(self.path.join(name)).expect("read profile")
    }
}

#[fixture]
fn home() -> Home {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 temp dir");
    Home { _dir: dir, path }
}

#[rstest]
fn last_existing_candidate_wins(home: Home) {
    home.write(".bash_profile", "# bash\n");
    home.write(".zshrc", "# zsh\n");

    let outcome = ensure_path_entry(&home.path, &home.bin_dir()).expect("profile edit");

    assert_eq!(
        outcome,
        PathEntryOutcome::Appended {
            profile: home.path.join(".zshrc")
        }
    );
    assert_eq!(
        home.read(".zshrc"),
        format!("# zsh\n{}\n", path_export_line(&home.bin_dir()))
    );
    assert_eq!(home.read(".bash_profile"), "# bash\n");
}

#[rstest]
fn profile_alone_is_chosen(home: Home) {
    home.write(".profile", "");

    let selection = select_profile(&home.path, &home.bin_dir()).expect("select");

    assert_eq!(
        selection,
        ProfileSelection::Candidate {
            path: home.path.join(".profile"),
            already_present: false,
        }
    );
}

#[rstest]
fn rerun_does_not_duplicate_entry(home: Home) {
    home.write(".zshrc", "# zsh\n");

    let first = ensure_path_entry(&home.path, &home.bin_dir()).expect("first run");
    let second = ensure_path_entry(&home.path, &home.bin_dir()).expect("second run");

    assert!(matches!(first, PathEntryOutcome::Appended { .. }));
    assert!(matches!(second, PathEntryOutcome::AlreadyPresent { .. }));
    assert_eq!(
        home.read(".zshrc").matches(home.bin_dir().as_str()).count(),
        1
    );
}

#[rstest]
fn entry_in_earlier_candidate_counts_as_present(home: Home) {
    home.write(
        ".profile",
        &format!("{}\n", path_export_line(&home.bin_dir())),
    );
    home.write(".zshrc", "# zsh\n");

    let outcome = ensure_path_entry(&home.path, &home.bin_dir()).expect("profile edit");

    assert_eq!(
        outcome,
        PathEntryOutcome::AlreadyPresent {
            profile: home.path.join(".zshrc")
        }
    );
    assert_eq!(home.read(".zshrc"), "# zsh\n");
}

#[rstest]
fn missing_candidates_fall_back_to_bashrc(home: Home) {
    let outcome = ensure_path_entry(&home.path, &home.bin_dir()).expect("profile edit");

    assert_eq!(outcome.profile(), home.path.join(".bashrc"));
    assert_eq!(
        home.read(".bashrc"),
        format!("{}\n", path_export_line(&home.bin_dir()))
    );
}

#[rstest]
fn fallback_appends_without_checking_contents(home: Home) {
    let line = path_export_line(&home.bin_dir());
    home.write(".bashrc", &format!("{line}\n"));

    ensure_path_entry(&home.path, &home.bin_dir()).expect("profile edit");

    assert_eq!(home.read(".bashrc"), format!("{line}\n{line}\n"));
}

#[rstest]
fn missing_trailing_newline_is_added_before_entry(home: Home) {
    home.write(".zshrc", "alias ll='ls -l'");

    ensure_path_entry(&home.path, &home.bin_dir()).expect("profile edit");

    assert_eq!(
        home.read(".zshrc"),
        format!("alias ll='ls -l'\n{}\n", path_export_line(&home.bin_dir()))
    );
}

#[cfg(unix)]
#[rstest]
fn unreadable_candidate_is_a_filesystem_error(home: Home) {
    // A directory named like a profile exists but cannot be read as text.
    fs::create_dir(home.path.join(".zshrc")).expect("create dir");

    let err = select_profile(&home.path, &home.bin_dir()).expect_err("not a file");

    assert!(matches!(
        err,
        InstallerError::Filesystem {
            action: "read profile",
            ..
        }
    ));
}
