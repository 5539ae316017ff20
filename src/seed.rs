//! First-run catalog. The default exercises are inserted only when the catalog
//! is empty, so restarting the application never duplicates or resurrects
//! entries.

use tracing::info;

use crate::config::AppConfig;
use crate::error::Result;
use crate::models::NewExercise;
use crate::repository::Repository;

pub const DEFAULT_EXERCISES: [NewExercise<'static>; 4] = [
    NewExercise {
        name: "Push-ups",
        description: "A common calisthenics exercise performed in a prone position by raising and lowering the body using the arms.",
        image_ref: "images/pushup.png",
        animation_ref: "gifs/pushup.gif",
    },
    NewExercise {
        name: "Squats",
        description: "A strength exercise in which the trainee lowers their hips from a standing position and then stands back up.",
        image_ref: "images/squat.png",
        animation_ref: "gifs/squat.gif",
    },
    NewExercise {
        name: "Plank",
        description: "An isometric core strength exercise that involves maintaining a position similar to a push-up for the maximum possible time.",
        image_ref: "images/plank.png",
        animation_ref: "gifs/plank.gif",
    },
    NewExercise {
        name: "Lunges",
        description: "A strength training exercise that works the quads, glutes, hamstrings, and calves.",
        image_ref: "images/lunge.png",
        animation_ref: "gifs/lunge.gif",
    },
];

/// Make sure the asset directories exist and seed the catalog when it is
/// empty. Returns how many entries were inserted.
pub fn ensure_default_catalog(repo: &Repository, config: &AppConfig) -> Result<usize> {
    config.ensure_dirs()?;

    if repo.exercise_count()? > 0 {
        return Ok(0);
    }

    for exercise in &DEFAULT_EXERCISES {
        repo.add_exercise(exercise)?;
    }
    info!(count = DEFAULT_EXERCISES.len(), "populated default exercises");
    Ok(DEFAULT_EXERCISES.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Store;

    #[test]
    fn seeding_runs_once() {
        let tmp = tempfile::tempdir().unwrap();
        let config = AppConfig::in_dir(tmp.path());
        let store = Store::open(&config.db_path);
        store.initialize_schema().unwrap();
        let repo = Repository::new(store);

        assert_eq!(ensure_default_catalog(&repo, &config).unwrap(), 4);
        assert_eq!(ensure_default_catalog(&repo, &config).unwrap(), 0);

        let names: Vec<String> = repo
            .list_exercises()
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["Lunges", "Plank", "Push-ups", "Squats"]);
        assert!(config.images_dir.is_dir());
        assert!(config.gifs_dir.is_dir());
    }
}
