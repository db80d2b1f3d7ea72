//! CLI integration tests for gibind.
//!
//! Stub tests pass `--no-preprocess` or stand-in tools so they do not depend
//! on the GObject-Introspection headers being installed.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the gibind binary command, isolated from any user configuration.
fn gibind(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("gibind").unwrap();
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env_remove("GIBIND_CONFIG");
    cmd
}

/// Create a temporary directory for a test run.
fn temp_dir() -> TempDir {
    TempDir::new().unwrap()
}

const OBJECT_GET_NAME: &str = "char* g_object_get_name(GObject* self, int x);";

// ============================================================================
// gibind enum
// ============================================================================

#[test]
fn test_enum_preset() {
    let tmp = temp_dir();

    gibind(&tmp)
        .args(["enum", "--preset", "type-tag"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("const TypeTag = enum(c_int) {\n"))
        .stdout(predicate::str::contains("    Void = C.GI_TYPE_TAG_VOID,\n"))
        .stdout(predicate::str::ends_with("};\n"));
}

#[test]
fn test_enum_from_stdin_bare() {
    let tmp = temp_dir();

    gibind(&tmp)
        .args(["enum", "--name", "TypeTag", "--prefix", "GI_TYPE_TAG", "--bare"])
        .write_stdin("GI_TYPE_TAG_VOID\nGI_TYPE_TAG_BOOLEAN\n")
        .assert()
        .success()
        .stdout(
            "const TypeTag = enum(c_int) {\n    Void = GI_TYPE_TAG_VOID,\n    Boolean = GI_TYPE_TAG_BOOLEAN,\n};\n",
        );
}

#[test]
fn test_enum_from_file_with_namespace() {
    let tmp = temp_dir();
    let list = tmp.path().join("tags.txt");
    fs::write(&list, "GI_INFO_TYPE_FUNCTION\n\n  GI_INFO_TYPE_VFUNC\n").unwrap();

    gibind(&tmp)
        .args(["enum", "--name", "InfoType", "--prefix", "GI_INFO_TYPE", "--namespace", "gi"])
        .arg(&list)
        .assert()
        .success()
        .stdout(predicate::str::contains("    Function = gi.GI_INFO_TYPE_FUNCTION,\n"))
        .stdout(predicate::str::contains("    Vfunc = gi.GI_INFO_TYPE_VFUNC,\n"));
}

#[test]
fn test_enum_prefix_mismatch_fails_without_output() {
    let tmp = temp_dir();

    gibind(&tmp)
        .args(["enum", "--name", "TypeTag", "--prefix", "GI_TYPE_TAG"])
        .write_stdin("GI_TYPE_TAG_VOID\nGI_INFO_TYPE_FUNCTION\n")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("GI_INFO_TYPE_FUNCTION"))
        .stderr(predicate::str::contains("GI_TYPE_TAG"));
}

#[test]
fn test_enum_requires_name() {
    let tmp = temp_dir();

    gibind(&tmp)
        .args(["enum", "--prefix", "GI_TYPE_TAG"])
        .write_stdin("GI_TYPE_TAG_VOID\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--name"));
}

#[test]
fn test_enum_preset_conflicts_with_input() {
    let tmp = temp_dir();

    gibind(&tmp)
        .args(["enum", "--preset", "info-type", "list.txt"])
        .assert()
        .failure();
}

// ============================================================================
// gibind stubs
// ============================================================================

#[test]
fn test_stubs_inline_input() {
    let tmp = temp_dir();

    gibind(&tmp)
        .args(["stubs", "--no-preprocess", OBJECT_GET_NAME])
        .assert()
        .success()
        .stdout(
            "pub fn objectGetName(self: Self, x: c_int) *char {\n\treturn C.g_object_get_name(self.raw, x);\n}\n",
        );
}

#[test]
fn test_stubs_from_stdin() {
    let tmp = temp_dir();

    gibind(&tmp)
        .args(["stubs", "--no-preprocess"])
        .write_stdin(
            "GObject *g_object_ref(GObject *object);\n\
             void g_object_unref(GObject *object);\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("pub fn objectRef(self: Self) *GObject {"))
        .stdout(predicate::str::contains("\treturn C.g_object_unref(self.raw);"));
}

#[test]
fn test_stubs_unsupported_type_fails_without_output() {
    let tmp = temp_dir();

    gibind(&tmp)
        .args(["stubs", "--no-preprocess"])
        .write_stdin(
            "GObject *g_object_ref(GObject *object);\n\
             void g_object_weak_ref(GObject *object, void (*notify)(gpointer), gpointer data);\n",
        )
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("g_object_weak_ref"))
        .stderr(predicate::str::contains("--keep-going"));
}

#[test]
fn test_stubs_keep_going_skips() {
    let tmp = temp_dir();

    gibind(&tmp)
        .args(["stubs", "--no-preprocess", "--keep-going"])
        .write_stdin(
            "GObject *g_object_ref(GObject *object);\n\
             void g_type_init(void);\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("pub fn objectRef("))
        .stdout(predicate::str::contains("typeInit").not())
        .stderr(predicate::str::contains("g_type_init"));
}

#[test]
fn test_stubs_echo_input() {
    let tmp = temp_dir();

    gibind(&tmp)
        .args(["stubs", "--no-preprocess", "--echo-input", OBJECT_GET_NAME])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "// input: \n// char* g_object_get_name(GObject* self, int x);\n",
        ));
}

#[test]
fn test_stubs_receiver_flags() {
    let tmp = temp_dir();

    gibind(&tmp)
        .args([
            "stubs",
            "--no-preprocess",
            "--receiver",
            "this",
            "--raw-field",
            "ptr",
            "--namespace",
            "c",
            "--strip-prefix",
            "g_object_",
            OBJECT_GET_NAME,
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("pub fn getName(this: Self, x: c_int) *char {"))
        .stdout(predicate::str::contains("\treturn c.g_object_get_name(this.ptr, x);"));
}

#[test]
fn test_stubs_filters() {
    let tmp = temp_dir();

    gibind(&tmp)
        .args(["stubs", "--no-preprocess", "--match", "^g_object_", "--exclude", "g_object_unref"])
        .write_stdin(
            "GObject *g_object_ref(GObject *object);\n\
             void g_object_unref(GObject *object);\n\
             GType g_type_from_name(const gchar *name);\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("objectRef"))
        .stdout(predicate::str::contains("objectUnref").not())
        .stdout(predicate::str::contains("typeFromName").not());
}

#[test]
fn test_stubs_invalid_match_pattern() {
    let tmp = temp_dir();

    gibind(&tmp)
        .args(["stubs", "--no-preprocess", "--match", "(", OBJECT_GET_NAME])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--match"));
}

#[test]
fn test_stubs_save_expanded() {
    let tmp = temp_dir();
    let expanded = tmp.path().join("out/expanded.c");

    gibind(&tmp)
        .args(["stubs", "--no-preprocess", "--save-expanded"])
        .arg(&expanded)
        .arg(OBJECT_GET_NAME)
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&expanded).unwrap(), OBJECT_GET_NAME);
}

#[test]
fn test_stubs_missing_pkg_config_fails() {
    let tmp = temp_dir();

    gibind(&tmp)
        .args(["stubs", "--pkg-config", "gibind-no-such-pkg-config", OBJECT_GET_NAME])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("gobject-introspection-1.0"))
        .stderr(predicate::str::contains("PKG_CONFIG_PATH"));
}

#[cfg(unix)]
#[test]
fn test_stubs_missing_cpp_fails_with_help() {
    let tmp = temp_dir();

    gibind(&tmp)
        .args(["stubs", "--pkg-config", "true", "--cpp", "gibind-no-such-cpp", OBJECT_GET_NAME])
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("failed to preprocess input"))
        .stderr(predicate::str::contains("--no-preprocess"));
}

#[test]
fn test_stubs_attribute_strings_keep_later_declarations() {
    let tmp = temp_dir();

    gibind(&tmp)
        .args(["stubs", "--no-preprocess"])
        .write_stdin(
            "void g_object_a(GObject *o) __attribute__((deprecated(\"see http://x\")));\n\
             void g_object_b(GObject *o);\n",
        )
        .assert()
        .success()
        .stdout(predicate::str::contains("pub fn objectA(self: Self) void {"))
        .stdout(predicate::str::contains("pub fn objectB(self: Self) void {"));
}

#[cfg(unix)]
#[test]
fn test_stubs_with_stand_in_tools() {
    let tmp = temp_dir();

    // `true` reports no flags and `cat` expands nothing.
    gibind(&tmp)
        .args(["stubs", "--pkg-config", "true", "--cpp", "cat", OBJECT_GET_NAME])
        .assert()
        .success()
        .stdout(predicate::str::contains("pub fn objectGetName("));
}

#[test]
fn test_stubs_config_file() {
    let tmp = temp_dir();
    let config = tmp.path().join("gibind.toml");
    fs::write(
        &config,
        r#"
[stubs]
receiver = "obj"
namespace = "gi"

[types]
int = "i32"
"#,
    )
    .unwrap();

    gibind(&tmp)
        .args(["stubs", "--no-preprocess", "--config"])
        .arg(&config)
        .arg(OBJECT_GET_NAME)
        .assert()
        .success()
        .stdout(predicate::str::contains("pub fn objectGetName(obj: Self, x: i32) *char {"))
        .stdout(predicate::str::contains("\treturn gi.g_object_get_name(obj.raw, x);"));
}

#[test]
fn test_project_config_is_picked_up() {
    let tmp = temp_dir();
    fs::create_dir(tmp.path().join(".gibind")).unwrap();
    fs::write(
        tmp.path().join(".gibind/config.toml"),
        "[enums]\nbare = true\n",
    )
    .unwrap();

    gibind(&tmp)
        .args(["enum", "--preset", "info-type"])
        .assert()
        .success()
        .stdout(predicate::str::contains("    Invalid = GI_INFO_TYPE_INVALID,\n"));
}

#[test]
fn test_broken_config_file_is_fatal() {
    let tmp = temp_dir();
    let config = tmp.path().join("broken.toml");
    fs::write(&config, "[stubs\n").unwrap();

    gibind(&tmp)
        .args(["enum", "--preset", "info-type", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse config file"));
}

// ============================================================================
// gibind parse
// ============================================================================

#[test]
fn test_parse_lists_declarations() {
    let tmp = temp_dir();

    gibind(&tmp)
        .args(["parse", "--no-preprocess", OBJECT_GET_NAME])
        .assert()
        .success()
        .stdout("char* g_object_get_name(GObject* self, int x);\n");
}

#[test]
fn test_parse_json() {
    let tmp = temp_dir();

    let output = gibind(&tmp)
        .args(["parse", "--no-preprocess", "--json", OBJECT_GET_NAME])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["functions"][0]["name"], "g_object_get_name");
    assert_eq!(json["functions"][0]["params"][1]["name"], "x");
}

// ============================================================================
// gibind completions
// ============================================================================

#[test]
fn test_completions_bash() {
    let tmp = temp_dir();

    gibind(&tmp)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gibind"));
}

#[test]
fn test_help_lists_commands() {
    let tmp = temp_dir();

    gibind(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("enum"))
        .stdout(predicate::str::contains("stubs"))
        .stdout(predicate::str::contains("parse"));
}
