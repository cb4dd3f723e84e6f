//! Project materialization from a template archive.
//!
//! Steps run in sequence; a failure aborts the remaining steps and surfaces
//! to the caller. Already-written files are left in place (no rollback).

use std::path::Path;

use tokio::fs;
use tracing::{debug, info};

use crate::archive::{ArchiveReader, EntryKind};
use crate::config::Settings;
use crate::error::{Error, Result};
use crate::repo::{Language, Repository};

use super::bootstrap::WrapperBootstrap;
use super::options::ProjectOptions;
use super::plan::ExtractionPlan;
use super::substitute::{render_properties, SubstitutionTable};

/// Generated build descriptor names and their template sources in the
/// store's per-language directory.
const BUILD_FILE: &str = "build.gradle";
const BUILD_TEMPLATE: &str = "build.gradle.template";
const PROPERTIES_FILE: &str = "gradle.properties";
const PROPERTIES_TEMPLATE: &str = "gradle.properties.template";

/// Static assets copied from the store root.
const SETTINGS_FILE: &str = "settings.gradle";
const PREFERENCES_DIR: &str = ".wpilib";
const PREFERENCES_FILE: &str = "wpilib_preferences.json";

/// Materializes template archives into new project trees.
pub struct ProjectGenerator<'a, R, B> {
    reader: &'a R,
    bootstrap: &'a B,
    settings: &'a Settings,
}

impl<'a, R: ArchiveReader, B: WrapperBootstrap> ProjectGenerator<'a, R, B> {
    pub fn new(reader: &'a R, bootstrap: &'a B, settings: &'a Settings) -> Self {
        Self {
            reader,
            bootstrap,
            settings,
        }
    }

    /// Extract the selected template into `options.dest`, write the build
    /// descriptors and bootstrap the build tool there.
    ///
    /// Existing directories are reused and files overwritten, so re-running
    /// over a populated destination reproduces the same tree.
    pub async fn generate(
        &self,
        options: &ProjectOptions,
        repo: &Repository,
        archive: &Path,
    ) -> Result<()> {
        options.validate()?;
        let lang = self.settings.language;
        let dest = &options.dest;

        let entries = self.reader.list(archive)?;
        let plan = ExtractionPlan::build(
            &entries,
            options.project_type,
            lang,
            self.settings.team_number,
        );

        let source_root = dest.join(&plan.project_root);
        create_dir_all(&source_root).await?;
        if let Some(include) = &plan.header_root {
            create_dir_all(&dest.join(include)).await?;
        }

        for entry in &plan.entries {
            let target = dest.join(&entry.dest);
            match entry.kind {
                EntryKind::Directory => create_dir_all(&target).await?,
                EntryKind::File => {
                    if let Some(parent) = target.parent() {
                        create_dir_all(parent).await?;
                    }
                    let contents = self.reader.read_file(archive, &entry.source)?;
                    write(&target, &contents).await?;
                }
            }
        }
        debug!(
            entries = plan.entries.len(),
            dest = %dest.display(),
            "template entries materialized"
        );

        self.write_descriptors(options, repo, dest, lang).await?;
        self.bootstrap.generate_wrapper(dest).await?;

        info!(dest = %dest.display(), "project generated");
        Ok(())
    }

    /// Build descriptor, substituted properties and the static assets.
    async fn write_descriptors(
        &self,
        options: &ProjectOptions,
        repo: &Repository,
        dest: &Path,
        lang: Language,
    ) -> Result<()> {
        let lang_dir = repo.local_dir(lang);

        let build = read(&lang_dir.join(BUILD_TEMPLATE)).await?;
        write(&dest.join(BUILD_FILE), &build).await?;

        let template = read_to_string(&lang_dir.join(PROPERTIES_TEMPLATE)).await?;
        let properties = render_properties(
            &self.substitutions(options, lang),
            &template,
            &self.settings.dependency_versions,
        )?;
        write(&dest.join(PROPERTIES_FILE), properties.as_bytes()).await?;

        let build_settings = read(&repo.local_root().join(SETTINGS_FILE)).await?;
        write(&dest.join(SETTINGS_FILE), &build_settings).await?;

        let prefs_dir = dest.join(PREFERENCES_DIR);
        create_dir_all(&prefs_dir).await?;
        let prefs = read(&repo.local_root().join(PREFERENCES_FILE)).await?;
        write(&prefs_dir.join(PREFERENCES_FILE), &prefs).await?;

        Ok(())
    }

    /// The enumerated placeholder set: team number, the comma-joined
    /// dependency list (configured user library directory first, then the
    /// caller's extras) and the debug flag.
    fn substitutions(&self, options: &ProjectOptions, lang: Language) -> SubstitutionTable {
        let mut dependencies = vec![self.settings.user_lib_dir(lang).display().to_string()];
        dependencies.extend(options.dependencies.iter().cloned());
        SubstitutionTable::new()
            .set("teamNumber", self.settings.team_number.to_string())
            .set("frcDependencies", dependencies.join(","))
            .set("debug", options.debug.to_string())
    }
}

async fn create_dir_all(path: &Path) -> Result<()> {
    fs::create_dir_all(path).await.map_err(Error::fs(path))
}

async fn read(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).await.map_err(Error::fs(path))
}

async fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).await.map_err(Error::fs(path))
}

async fn write(path: &Path, contents: &[u8]) -> Result<()> {
    fs::write(path, contents).await.map_err(Error::fs(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::testing::write_zip;
    use crate::archive::ZipReader;
    use crate::project::bootstrap::tests::{FailingBootstrap, RecordingBootstrap};
    use crate::project::options::ProjectType;
    use std::sync::atomic::Ordering;

    const TEMPLATE_ENTRIES: &[(&str, &str)] = &[
        ("templates/timed/", ""),
        ("templates/timed/Robot.java", "public class Robot {}\n"),
        ("templates/timed/subsystems/", ""),
        ("templates/timed/subsystems/Drive.java", "class Drive {}\n"),
        ("templates/sample/Robot.java", "not this one\n"),
    ];

    /// Store layout the generator reads descriptor templates from.
    fn seed_store(root: &Path, lang: Language) -> Repository {
        let repo = Repository::templates(root.join("templates"));
        let lang_dir = repo.local_dir(lang);
        std::fs::create_dir_all(&lang_dir).unwrap();
        std::fs::write(lang_dir.join(BUILD_TEMPLATE), "apply plugin: 'frc'\n").unwrap();
        std::fs::write(
            lang_dir.join(PROPERTIES_TEMPLATE),
            "team=${teamNumber}\ndeps=${frcDependencies}\ndebug=${debug}\n",
        )
        .unwrap();
        std::fs::write(repo.local_root().join(SETTINGS_FILE), "include ':robot'\n").unwrap();
        std::fs::write(
            repo.local_root().join(PREFERENCES_FILE),
            "{\"currentLanguage\": \"java\"}\n",
        )
        .unwrap();
        repo
    }

    fn settings(lang: Language) -> Settings {
        let mut settings = Settings {
            team_number: 1234,
            language: lang,
            ..Settings::default()
        };
        settings.user_libraries.java_lib_dir = "/libs/java".into();
        settings.user_libraries.cpp_lib_dir = "/libs/cpp".into();
        settings
    }

    #[tokio::test]
    async fn generates_a_full_java_project() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = seed_store(tmp.path(), Language::Java);
        let archive = write_zip(tmp.path(), "templates.zip", TEMPLATE_ENTRIES);
        let dest = tmp.path().join("project");

        let settings = settings(Language::Java);
        let bootstrap = RecordingBootstrap::default();
        let generator = ProjectGenerator::new(&ZipReader, &bootstrap, &settings);

        let mut options = ProjectOptions::new(&dest, ProjectType::Timed);
        options.dependencies = vec!["extraLib".to_string()];
        generator.generate(&options, &repo, &archive).await.unwrap();

        let robot = dest.join("src/main/java/frc/team1234/robot/Robot.java");
        assert_eq!(
            std::fs::read_to_string(robot).unwrap(),
            "public class Robot {}\n"
        );
        assert!(dest
            .join("src/main/java/frc/team1234/robot/subsystems/Drive.java")
            .exists());
        // the sample template stays out of a timed project
        assert!(!dest.join("src/main/java/frc/team1234/robot").join("sample").exists());

        assert_eq!(
            std::fs::read_to_string(dest.join(BUILD_FILE)).unwrap(),
            "apply plugin: 'frc'\n"
        );
        let properties = std::fs::read_to_string(dest.join(PROPERTIES_FILE)).unwrap();
        assert!(properties.starts_with(
            "team=1234\ndeps=/libs/java,extraLib\ndebug=false\n"
        ));
        assert!(dest.join(SETTINGS_FILE).exists());
        assert!(dest.join(".wpilib/wpilib_preferences.json").exists());
        assert_eq!(bootstrap.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn pinned_overrides_land_in_properties() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = seed_store(tmp.path(), Language::Java);
        let archive = write_zip(tmp.path(), "templates.zip", TEMPLATE_ENTRIES);
        let dest = tmp.path().join("project");

        let mut settings = settings(Language::Java);
        settings
            .dependency_versions
            .insert("wpilibVersion".to_string(), "2024.1.1".to_string());
        let bootstrap = RecordingBootstrap::default();
        let generator = ProjectGenerator::new(&ZipReader, &bootstrap, &settings);

        let options = ProjectOptions::new(&dest, ProjectType::Timed);
        generator.generate(&options, &repo, &archive).await.unwrap();

        let properties = std::fs::read_to_string(dest.join(PROPERTIES_FILE)).unwrap();
        assert!(properties.contains("wpilibVersion=2024.1.1\n"));
        // the remaining defaults stay on "latest" and are not pinned
        assert!(!properties.contains("ntcoreVersion"));
    }

    #[tokio::test]
    async fn cpp_headers_land_in_the_include_tree() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = seed_store(tmp.path(), Language::Cpp);
        let archive = write_zip(
            tmp.path(),
            "templates.zip",
            &[
                ("templates/sample/", ""),
                ("templates/sample/robot/Robot.cpp", "int main() {}\n"),
                ("templates/sample/robot/Robot.h", "#pragma once\n"),
            ],
        );
        let dest = tmp.path().join("project");

        let settings = settings(Language::Cpp);
        let bootstrap = RecordingBootstrap::default();
        let generator = ProjectGenerator::new(&ZipReader, &bootstrap, &settings);

        let options = ProjectOptions::new(&dest, ProjectType::Sample);
        generator.generate(&options, &repo, &archive).await.unwrap();

        assert!(dest.join("src/cpp/robot/Robot.cpp").exists());
        assert!(dest.join("src/include/Robot.h").exists());
        assert!(!dest.join("src/cpp/robot/Robot.h").exists());
    }

    #[tokio::test]
    async fn regeneration_over_a_populated_destination_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = seed_store(tmp.path(), Language::Java);
        let archive = write_zip(tmp.path(), "templates.zip", TEMPLATE_ENTRIES);
        let dest = tmp.path().join("project");

        let settings = settings(Language::Java);
        let bootstrap = RecordingBootstrap::default();
        let generator = ProjectGenerator::new(&ZipReader, &bootstrap, &settings);
        let options = ProjectOptions::new(&dest, ProjectType::Timed);

        generator.generate(&options, &repo, &archive).await.unwrap();
        let first = std::fs::read_to_string(dest.join(PROPERTIES_FILE)).unwrap();
        generator.generate(&options, &repo, &archive).await.unwrap();
        let second = std::fs::read_to_string(dest.join(PROPERTIES_FILE)).unwrap();

        assert_eq!(first, second);
        assert_eq!(bootstrap.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn missing_destination_aborts_before_any_io() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = seed_store(tmp.path(), Language::Java);
        let archive = write_zip(tmp.path(), "templates.zip", TEMPLATE_ENTRIES);

        let settings = settings(Language::Java);
        let bootstrap = RecordingBootstrap::default();
        let generator = ProjectGenerator::new(&ZipReader, &bootstrap, &settings);

        let options = ProjectOptions::new("", ProjectType::Timed);
        let err = generator
            .generate(&options, &repo, &archive)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::MissingOptions(_)), "got {err:?}");
        assert_eq!(bootstrap.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn bootstrap_failure_surfaces_as_build_tool_error() {
        let tmp = tempfile::tempdir().unwrap();
        let repo = seed_store(tmp.path(), Language::Java);
        let archive = write_zip(tmp.path(), "templates.zip", TEMPLATE_ENTRIES);
        let dest = tmp.path().join("project");

        let settings = settings(Language::Java);
        let generator = ProjectGenerator::new(&ZipReader, &FailingBootstrap, &settings);

        let options = ProjectOptions::new(&dest, ProjectType::Timed);
        let err = generator
            .generate(&options, &repo, &archive)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::BuildTool(_)), "got {err:?}");
        // extraction had already happened; nothing is rolled back
        assert!(dest.join("src/main/java/frc/team1234/robot/Robot.java").exists());
    }
}
