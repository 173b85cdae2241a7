mod common;

use common::{fixture, setup};

use ecscat::reconcile::{app_version, minimum};
use ecscat::{AppVersion, ErrorKind, FileMetadata, MetadataSource, LEGACY_APP_TEMPLATE_VERSION};
use semver::Version;

#[test]
fn stack_set_lags_behind() {
    setup();
    let md = FileMetadata::new(fixture("metadata"));
    let ver = app_version(&md, "current").unwrap();
    assert_eq!(ver.to_string(), "v1.2.0");
    assert_eq!(ver.semver(), Some(&Version::new(1, 2, 0)));
}

#[test]
fn unversioned_stack_is_legacy() {
    setup();
    let md = FileMetadata::new(fixture("metadata"));
    let ver = app_version(&md, "legacy").unwrap();
    assert_eq!(ver, AppVersion::Legacy);
    assert_eq!(ver.to_string(), LEGACY_APP_TEMPLATE_VERSION);
}

#[test]
fn missing_stack_set_is_a_fetch_error() {
    setup();
    let md = FileMetadata::new(fixture("metadata"));
    let err = app_version(&md, "orphan").unwrap_err();
    match err.kind() {
        ErrorKind::MetadataFetch(MetadataSource::StackSet(name)) => {
            assert_eq!(name, "orphan-infrastructure");
        }
        k => panic!("unexpected error {:?}", k),
    }
}

#[test]
fn missing_app_fails_on_the_stack() {
    setup();
    let md = FileMetadata::new(fixture("metadata"));
    let err = app_version(&md, "ghost").unwrap_err();
    match err.kind() {
        ErrorKind::MetadataFetch(MetadataSource::Stack(name)) => {
            assert_eq!(name, "ghost-infrastructure-roles");
        }
        k => panic!("unexpected error {:?}", k),
    }
}

#[test]
fn corrupt_stack_set_is_a_parse_error() {
    setup();
    let md = FileMetadata::new(fixture("metadata"));
    let err = app_version(&md, "corrupt").unwrap_err();
    match err.kind() {
        ErrorKind::MetadataParse(src) => {
            assert_eq!(src, &MetadataSource::StackSet("corrupt-infrastructure".into()));
        }
        k => panic!("unexpected error {:?}", k),
    }
    assert_eq!(err.to_string(), "failed to parse metadata for app stack set corrupt-infrastructure");
}

#[test]
fn minimum_across_apps() {
    setup();
    let md = FileMetadata::new(fixture("metadata"));
    let sources = vec![
        MetadataSource::Stack("current-infrastructure-roles".into()),
        MetadataSource::StackSet("legacy-infrastructure".into()),
        MetadataSource::StackSet("current-infrastructure".into()),
    ];
    assert_eq!(minimum(&md, &sources).unwrap().to_string(), "v1.0.0");
}
