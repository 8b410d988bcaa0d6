//! End-to-end declaration loading from packline.toml and package.json.

use std::fs;
use std::path::PathBuf;

use packline_config::{
    AliasTarget, AssetCategory, ConfigDiscovery, RuleDecl, UnmatchedPolicy,
};
use tempfile::TempDir;

#[test]
fn loads_a_full_toml_declaration() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("packline.toml"),
        r#"
extensions = [".js", ".vue", ".json"]
include = ["src", "test"]
unmatched = "fail"

[entries]
app = "src/main.js"
admin = "src/admin.js"

[output]
assets_root = "build"
assets_subdir = "assets"
public_path = "/cdn/"

[aliases]
"@" = { dir = "src" }
"vue$" = "vue/dist/vue.esm.js"

[[rules]]
kind = "lint"

[[rules]]
kind = "component-template"

[[rules]]
kind = "script-transpile"

[[rules]]
kind = "asset-url"
category = "image"
limit = 4096

[[externals]]
name = "axios"
dist_path = "axios.min.js"

[[externals]]
name = "bootstrap"
cdn_name = "twitter-bootstrap"
dist_path = "js/bootstrap.min.js"
styles = "css/bootstrap.css"
"#,
    )
    .unwrap();

    let options = ConfigDiscovery::new(dir.path()).load().unwrap();

    assert_eq!(options.entries["admin"], PathBuf::from("src/admin.js"));
    assert_eq!(options.output.assets_root, PathBuf::from("build"));
    assert_eq!(options.output.assets_subdir, "assets");
    assert_eq!(options.output.public_path, "/cdn/");
    assert_eq!(
        options.aliases["@"],
        AliasTarget::Dir {
            dir: PathBuf::from("src")
        }
    );
    assert_eq!(options.unmatched, UnmatchedPolicy::Fail);
    assert_eq!(options.rules.len(), 4);
    assert!(matches!(
        options.rules.iter().last().unwrap(),
        RuleDecl::AssetUrl {
            category: AssetCategory::Image,
            limit: 4096
        }
    ));
    assert_eq!(options.externals.len(), 2);
    assert_eq!(
        options.externals.get("bootstrap").unwrap().registry_name(),
        "twitter-bootstrap"
    );
}

#[test]
fn loads_declarations_from_the_package_json_field() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("package.json"),
        r#"{
            "name": "wiki-ui",
            "dependencies": { "axios": "^0.18.0" },
            "packline": {
                "entries": { "app": "src/main.js" },
                "externals": [
                    { "name": "axios", "dist_path": "axios.min.js" }
                ]
            }
        }"#,
    )
    .unwrap();

    let options = ConfigDiscovery::new(dir.path()).load().unwrap();
    assert_eq!(options.entries["app"], PathBuf::from("src/main.js"));
    assert_eq!(options.externals.len(), 1);
}

#[test]
fn duplicate_externals_in_a_declaration_fail_to_load() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("packline.toml"),
        r#"
[entries]
app = "src/main.js"

[[externals]]
name = "lodash"
dist_path = "lodash.min.js"

[[externals]]
name = "lodash"
dist_path = "lodash.js"
"#,
    )
    .unwrap();

    let result = ConfigDiscovery::new(dir.path()).load();
    assert!(result.is_err());
}
