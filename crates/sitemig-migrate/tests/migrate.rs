use pretty_assertions::assert_eq;
use sitemig_migrate::{migrate_tree, run_migration, Config, MigrateConfig, MigrateError};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn page(body: &str) -> String {
    format!("<!DOCTYPE html>\n<html>\n<head><title>Old</title></head>\n<body>\n{body}\n</body>\n</html>\n")
}

/// Every file under `root` with its bytes, in path order.
fn snapshot(root: &Path) -> Vec<(PathBuf, Vec<u8>)> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .map(|e| e.unwrap())
        .filter(|e| e.file_type().is_file())
        .map(|e| {
            let rel = e.path().strip_prefix(root).unwrap().to_path_buf();
            (rel, fs::read(e.path()).unwrap())
        })
        .collect()
}

// =========================================================================
// Page migration
// =========================================================================

#[test]
fn test_home_page_end_to_end() {
    let tmp = TempDir::new().unwrap();
    let src = tmp.path().join("site");
    let dest = tmp.path().join("out");
    write(
        &src.join("pages/home/index.html"),
        &page("  <div class=\"hero-banner\">Hi</div>"),
    );
    write(&src.join("pages/home/index.css"), ".hero-banner { color: red; }\n");

    let report = migrate_tree(&src, &dest, &MigrateConfig::default()).unwrap();

    assert_eq!(report.migrated.len(), 1);
    assert_eq!(report.migrated[0].component_name, "Home");
    assert_eq!(
        fs::read_to_string(dest.join("pages/home/index.jsx")).unwrap(),
        "import Head from 'next/head';\n\
         import styles from './index.module.css';\n\
         \n\
         export default function Home() {\n\
         \x20 return (\n\
         \x20   <>\n\
         \x20     <Head>\n\
         \x20       <title>Home</title>\n\
         \x20     </Head>\n\
         \x20     <div className={styles.wrapper}>\n\
         \x20       <div className=\"hero-banner\">Hi</div>\n\
         \x20     </div>\n\
         \x20   </>\n\
         \x20 );\n\
         }\n"
    );
    assert_eq!(
        fs::read(dest.join("pages/home/index.module.css")).unwrap(),
        fs::read(src.join("pages/home/index.css")).unwrap()
    );
    assert!(!dest.join("pages/home/index.js").exists());
}

#[test]
fn test_script_is_copied_and_imported() {
    let tmp = TempDir::new().unwrap();
    let src = tmp.path().join("site");
    let dest = tmp.path().join("out");
    let script = "export default function () {\n  console.log('faq');\n}\n";
    write(&src.join("faq/index.html"), &page("<p>Questions<br>answers</p>"));
    write(&src.join("faq/index.js"), script);

    migrate_tree(&src, &dest, &MigrateConfig::default()).unwrap();

    assert_eq!(fs::read_to_string(dest.join("faq/index.js")).unwrap(), script);
    let component = fs::read_to_string(dest.join("faq/index.jsx")).unwrap();
    assert!(component.contains("import pageScript from './index.js';"));
    assert!(component.contains("useEffect"));
    assert!(component.contains("<p>Questions<br />answers</p>"));
    assert!(!component.contains("import styles"));
    assert!(component.contains("      <div>\n"));
}

#[test]
fn test_missing_index_is_skipped_but_descended() {
    let tmp = TempDir::new().unwrap();
    let src = tmp.path().join("site");
    let dest = tmp.path().join("out");
    write(&src.join("blog/notes.txt"), "not a page");
    write(&src.join("blog/post-one/index.html"), &page("<h1>One</h1>"));

    let report = migrate_tree(&src, &dest, &MigrateConfig::default()).unwrap();

    assert!(dest.join("blog/post-one/index.jsx").exists());
    assert!(!dest.join("blog/index.jsx").exists());
    assert_eq!(report.skipped, vec![src.clone(), src.join("blog")]);
    assert_eq!(report.migrated[0].component_name, "PostOne");
}

#[test]
fn test_page_without_body_has_empty_wrapper() {
    let tmp = TempDir::new().unwrap();
    let src = tmp.path().join("site");
    let dest = tmp.path().join("out");
    write(&src.join("empty/index.html"), "<html><head></head></html>");

    migrate_tree(&src, &dest, &MigrateConfig::default()).unwrap();

    let component = fs::read_to_string(dest.join("empty/index.jsx")).unwrap();
    assert!(component.contains("      <div>\n      </div>\n"));
}

#[test]
fn test_comments_and_head_are_dropped() {
    let tmp = TempDir::new().unwrap();
    let src = tmp.path().join("site");
    let dest = tmp.path().join("out");
    write(
        &src.join("about-us/index.html"),
        &page("<!-- nav --><nav class=\"top-nav\"><img src=\"logo.png\"></nav>"),
    );

    migrate_tree(&src, &dest, &MigrateConfig::default()).unwrap();

    let component = fs::read_to_string(dest.join("about-us/index.jsx")).unwrap();
    assert!(component.contains("export default function AboutUs()"));
    assert!(component.contains("<nav className=\"top-nav\"><img src=\"logo.png\" /></nav>"));
    assert!(!component.contains("nav -->"));
    assert!(!component.contains("<title>Old</title>"));
}

#[test]
fn test_colliding_names_get_suffixes() {
    let tmp = TempDir::new().unwrap();
    let src = tmp.path().join("site");
    let dest = tmp.path().join("out");
    write(&src.join("en/about/index.html"), &page("en"));
    write(&src.join("fr/about/index.html"), &page("fr"));

    let report = migrate_tree(&src, &dest, &MigrateConfig::default()).unwrap();

    let names: Vec<_> = report
        .migrated
        .iter()
        .map(|p| p.component_name.as_str())
        .collect();
    assert_eq!(names, vec!["About", "About2"]);
    let fr = fs::read_to_string(dest.join("fr/about/index.jsx")).unwrap();
    assert!(fr.contains("export default function About2()"));
}

#[test]
fn test_rerun_is_byte_identical() {
    let tmp = TempDir::new().unwrap();
    let src = tmp.path().join("site");
    let dest = tmp.path().join("out");
    write(&src.join("index.html"), &page("<p>root</p>"));
    write(&src.join("a/index.html"), &page("<p class=x>a</p>"));
    write(&src.join("a/index.css"), ".x{}");
    write(&src.join("b/index.html"), &page("<p>b</p>"));
    write(&src.join("b/index.js"), "export default () => {};");

    migrate_tree(&src, &dest, &MigrateConfig::default()).unwrap();
    let first = snapshot(&dest);
    migrate_tree(&src, &dest, &MigrateConfig::default()).unwrap();
    let second = snapshot(&dest);

    assert_eq!(first.len(), 5);
    assert_eq!(first, second);
}

#[test]
fn test_malformed_markup_aborts() {
    let tmp = TempDir::new().unwrap();
    let src = tmp.path().join("site");
    let dest = tmp.path().join("out");
    write(&src.join("bad/index.html"), "<body><!-- never closed");

    let err = migrate_tree(&src, &dest, &MigrateConfig::default()).unwrap_err();
    assert!(matches!(err, MigrateError::Parse { .. }));
    assert!(!err.is_recoverable());
}

#[test]
fn test_missing_source_root_is_fatal() {
    let tmp = TempDir::new().unwrap();
    let err = migrate_tree(
        &tmp.path().join("nope"),
        &tmp.path().join("out"),
        &MigrateConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, MigrateError::Walk(_)));
}

#[test]
fn test_custom_attribute_renames() {
    let tmp = TempDir::new().unwrap();
    let src = tmp.path().join("site");
    let dest = tmp.path().join("out");
    write(
        &src.join("contact/index.html"),
        &page("<label for=\"email\" class=\"lbl\">Email</label>"),
    );
    let config = Config::from_toml(
        "[migrate.attribute_renames]\nclass = \"className\"\nfor = \"htmlFor\"\n",
    )
    .unwrap();

    migrate_tree(&src, &dest, &config.migrate).unwrap();

    let component = fs::read_to_string(dest.join("contact/index.jsx")).unwrap();
    assert!(component.contains("<label htmlFor=\"email\" className=\"lbl\">Email</label>"));
}

#[cfg(unix)]
#[test]
fn test_symlink_cycle_is_skipped() {
    let tmp = TempDir::new().unwrap();
    let src = tmp.path().join("site");
    let dest = tmp.path().join("out");
    write(&src.join("home/index.html"), &page("<p>home</p>"));
    std::os::unix::fs::symlink(&src, src.join("home/loop")).unwrap();

    let report = migrate_tree(&src, &dest, &MigrateConfig::default()).unwrap();

    assert_eq!(report.migrated.len(), 1);
    assert!(dest.join("home/index.jsx").exists());
}

#[cfg(unix)]
#[test]
fn test_directory_linked_twice_is_visited_once() {
    let tmp = TempDir::new().unwrap();
    let src = tmp.path().join("site");
    let shared = tmp.path().join("shared");
    let dest = tmp.path().join("out");
    write(&shared.join("index.html"), &page("<p>shared</p>"));
    fs::create_dir_all(&src).unwrap();
    std::os::unix::fs::symlink(&shared, src.join("a")).unwrap();
    std::os::unix::fs::symlink(&shared, src.join("b")).unwrap();

    let report = migrate_tree(&src, &dest, &MigrateConfig::default()).unwrap();

    assert_eq!(report.migrated.len(), 1);
    assert!(dest.join("a/index.jsx").exists());
    assert!(!dest.join("b/index.jsx").exists());
}

// =========================================================================
// Full run
// =========================================================================

#[test]
fn test_run_migration_writes_pages_and_scaffold() {
    let tmp = TempDir::new().unwrap();
    let mut config = Config::default();
    config.migrate.source = tmp.path().join("hood-static");
    config.migrate.destination = tmp.path().join("hood-next");
    write(&config.migrate.source.join("index.html"), &page("<p>hi</p>"));

    let report = run_migration(&config).unwrap();

    let dest = &config.migrate.destination;
    assert_eq!(report.migrated.len(), 1);
    assert_eq!(report.migrated[0].component_name, "HoodStatic");
    assert!(dest.join("pages/index.jsx").exists());
    assert!(fs::read_to_string(dest.join("next.config.js"))
        .unwrap()
        .contains("reactStrictMode: true"));
    let manifest = fs::read_to_string(dest.join("package.json")).unwrap();
    assert!(manifest.starts_with("{\n  \"name\": \"hood-next\","));
}

#[test]
fn test_run_migration_without_source_writes_no_scaffold() {
    let tmp = TempDir::new().unwrap();
    let mut config = Config::default();
    config.migrate.source = tmp.path().join("missing");
    config.migrate.destination = tmp.path().join("hood-next");

    assert!(run_migration(&config).is_err());
    assert!(!config.migrate.destination.join("package.json").exists());
}
