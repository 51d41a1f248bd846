/*!
 * Tests for controller input and overwrite policy
 *
 * These paths resolve before any collaborator is invoked, so they run
 * without a recognizer binary or network access.
 */

use anyhow::Result;

use crate::common;
use subvox::app_config::Config;
use subvox::app_controller::Controller;

/// Missing input is a "no audio provided" failure
#[tokio::test]
async fn test_run_withMissingInput_shouldReportNoAudio() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = Controller::with_config(Config::default())?;

    let missing = temp_dir.path().join("missing.mp3");
    let error = controller
        .run(missing, temp_dir.path().to_path_buf(), false)
        .await
        .unwrap_err();

    assert!(error.to_string().contains("No audio provided"));
    Ok(())
}

/// Unsupported file types are rejected up front
#[tokio::test]
async fn test_run_withUnsupportedExtension_shouldReportNoAudio() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();
    let notes = common::create_test_file(&dir, "notes.txt", "not audio")?;

    let controller = Controller::with_config(Config::default())?;
    let error = controller.run(notes, dir, false).await.unwrap_err();

    assert!(error.to_string().contains("not a supported audio file"));
    Ok(())
}

/// Existing outputs are skipped unless overwrite is forced
#[tokio::test]
async fn test_run_withExistingOutput_shouldSkipWithoutForce() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let dir = temp_dir.path().to_path_buf();

    let audio = common::create_test_file(&dir, "talk.mp3", "fake audio bytes")?;
    let existing = common::create_test_file(&dir, "talk.zh-TW.srt", "1\nkeep me\n\n")?;

    let controller = Controller::with_config(Config::default())?;
    controller.run(audio, dir, false).await?;

    // The run returned without touching the existing document
    assert_eq!(std::fs::read_to_string(existing)?, "1\nkeep me\n\n");
    Ok(())
}
