use std::fs;
use std::path::Path;

use bucket_upload::error::Error;
use bucket_upload::storage::MockStorageUploader;
use bucket_upload::upload::{execute, run_upload, Credentials, Outcome, UploadConfig};
use tempfile::tempdir;

fn config_for(repo: &Path, upload_dir: &str) -> UploadConfig {
    UploadConfig {
        repo_directory: repo.to_string_lossy().into_owned(),
        upload_directory_path: upload_dir.to_string(),
        bucket_name: "artifacts".to_string(),
    }
}

#[tokio::test]
async fn empty_directory_is_a_soft_success() {
    let repo = tempdir().unwrap();
    fs::create_dir(repo.path().join("dist")).unwrap();

    let mut uploader = MockStorageUploader::new();
    uploader.expect_upload_object().times(0);

    let outcome = run_upload(&config_for(repo.path(), "dist"), &uploader)
        .await
        .expect("an empty directory should not fail the run");

    assert_eq!(outcome.message(), "no files in provided directory 'dist'");
}

#[tokio::test]
async fn uploads_every_file_once() {
    let repo = tempdir().unwrap();
    let dist = repo.path().join("dist");
    fs::create_dir(&dist).unwrap();
    fs::write(dist.join("a.txt"), b"alpha").unwrap();
    fs::write(dist.join("b.png"), b"\x89PNG").unwrap();

    let mut uploader = MockStorageUploader::new();
    uploader
        .expect_upload_object()
        .times(2)
        .withf(|bucket, key, _payload, content_type| {
            bucket == "artifacts"
                && match key {
                    "a.txt" => content_type == "text/plain",
                    "b.png" => content_type == "image/png",
                    _ => false,
                }
        })
        .returning(|_, _, _, _| Ok(()));

    let outcome = run_upload(&config_for(repo.path(), "dist"), &uploader)
        .await
        .expect("both uploads should succeed");

    assert_eq!(outcome, Outcome::Uploaded);
    assert_eq!(outcome.message(), "Files uploaded successfully");
}

#[tokio::test]
async fn stops_at_the_first_failed_upload() {
    let repo = tempdir().unwrap();
    let dist = repo.path().join("dist");
    fs::create_dir(&dist).unwrap();
    fs::write(dist.join("a.txt"), b"alpha").unwrap();
    fs::write(dist.join("b.png"), b"\x89PNG").unwrap();

    // Exactly one call: the first failure must abort the run before the
    // second file is attempted.
    let mut uploader = MockStorageUploader::new();
    uploader
        .expect_upload_object()
        .times(1)
        .returning(|_, key, _, _| {
            Err(Error::Upload {
                key: key.to_string(),
                message: "Bucket not found".to_string(),
            })
        });

    let err = run_upload(&config_for(repo.path(), "dist"), &uploader)
        .await
        .expect_err("the run should fail with the backend's error");

    assert!(
        err.to_string().contains("Bucket not found"),
        "failure message should carry the backend message, got: {err}"
    );
}

#[tokio::test]
async fn subdirectories_are_not_descended() {
    let repo = tempdir().unwrap();
    let dist = repo.path().join("dist");
    fs::create_dir_all(dist.join("nested")).unwrap();
    fs::write(dist.join("nested/inner.txt"), b"inner").unwrap();
    fs::write(dist.join("top.txt"), b"top").unwrap();

    let mut uploader = MockStorageUploader::new();
    uploader
        .expect_upload_object()
        .times(1)
        .withf(|_, key, _, _| key == "top.txt")
        .returning(|_, _, _, _| Ok(()));

    let outcome = run_upload(&config_for(repo.path(), "dist"), &uploader)
        .await
        .expect("the top-level file should upload");

    assert_eq!(outcome, Outcome::Uploaded);
}

#[tokio::test]
async fn missing_upload_directory_is_a_filesystem_error() {
    let repo = tempdir().unwrap();

    let mut uploader = MockStorageUploader::new();
    uploader.expect_upload_object().times(0);

    let err = run_upload(&config_for(repo.path(), "dist"), &uploader)
        .await
        .expect_err("a nonexistent directory must fail the run");

    assert!(
        matches!(err, Error::Filesystem { .. }),
        "expected a filesystem error, got: {err:?}"
    );
}

#[tokio::test]
async fn each_missing_input_fails_before_any_filesystem_or_network_call() {
    // The repo path does not exist: if validation let a case through, the
    // run would surface a filesystem error instead of a configuration one.
    let base = UploadConfig {
        repo_directory: "/nonexistent/checkout".to_string(),
        upload_directory_path: "dist".to_string(),
        bucket_name: "artifacts".to_string(),
    };
    let creds = Credentials {
        project_id: "proj".to_string(),
        api_key: "key".to_string(),
    };

    let cases: Vec<(UploadConfig, Credentials, &str)> = vec![
        (
            UploadConfig {
                repo_directory: String::new(),
                ..base.clone()
            },
            creds.clone(),
            "repository directory is undefined",
        ),
        (
            UploadConfig {
                upload_directory_path: String::new(),
                ..base.clone()
            },
            creds.clone(),
            "directory is undefined",
        ),
        (
            UploadConfig {
                bucket_name: String::new(),
                ..base.clone()
            },
            creds.clone(),
            "bucket is undefined",
        ),
        (
            base.clone(),
            Credentials {
                project_id: String::new(),
                ..creds.clone()
            },
            "Supabase credentials are undefined",
        ),
        (
            base.clone(),
            Credentials {
                api_key: String::new(),
                ..creds.clone()
            },
            "Supabase credentials are undefined",
        ),
    ];

    for (config, credentials, expected) in cases {
        let err = execute(&config, &credentials)
            .await
            .expect_err("a missing required input must fail the run");
        assert!(
            matches!(err, Error::Configuration(_)),
            "expected a configuration error for '{expected}', got: {err:?}"
        );
        assert_eq!(err.to_string(), expected);
    }
}
