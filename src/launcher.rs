use crate::catalog::TileRecord;
use std::path::Path;

/// What the overlay asks the launcher to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchRequest {
    pub executable: String,
    pub arguments: String,
    pub working_directory: String,
}

impl From<&TileRecord> for LaunchRequest {
    fn from(tile: &TileRecord) -> Self {
        Self {
            executable: tile.executable.clone(),
            arguments: tile.arguments.clone(),
            working_directory: tile.working_directory.clone(),
        }
    }
}

/// Starts a process for a tile. Implementations must not wait for the child.
pub trait Launcher {
    fn launch(&self, request: &LaunchRequest) -> anyhow::Result<()>;
}

/// Launches tiles with [`std::process::Command`], or hands non-executable
/// targets to the desktop's default handler.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessLauncher;

/// Split an argument string the way a shell would, falling back to plain
/// whitespace separation for unbalanced quotes.
pub fn split_arguments(arguments: &str) -> Vec<String> {
    let arguments = arguments.trim();
    if arguments.is_empty() {
        return Vec::new();
    }
    shlex::split(arguments)
        .unwrap_or_else(|| arguments.split_whitespace().map(str::to_string).collect())
}

fn looks_executable(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => ["exe", "bat", "cmd", "com"]
            .iter()
            .any(|known| ext.eq_ignore_ascii_case(known)),
        // bare commands like `notepad` or `/usr/bin/foot`
        None => true,
    }
}

impl Launcher for ProcessLauncher {
    fn launch(&self, request: &LaunchRequest) -> anyhow::Result<()> {
        let path = Path::new(&request.executable);
        let args = split_arguments(&request.arguments);
        let working_dir = request.working_directory.trim();

        if !looks_executable(path) && args.is_empty() && working_dir.is_empty() {
            tracing::debug!(target = %request.executable, "opening with default handler");
            return open::that(path).map_err(|e| e.into());
        }

        let mut command = std::process::Command::new(path);
        command.args(&args);
        if !working_dir.is_empty() {
            command.current_dir(working_dir);
        }
        tracing::debug!(executable = %request.executable, ?args, "spawning tile process");
        command.spawn().map(|_| ()).map_err(|e| e.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_arguments_stay_together() {
        assert_eq!(
            split_arguments(r#"--title "My Notes" -n"#),
            vec!["--title", "My Notes", "-n"]
        );
    }

    #[test]
    fn unbalanced_quotes_fall_back_to_whitespace() {
        assert_eq!(split_arguments(r#"a "b c"#), vec!["a", "\"b", "c"]);
        assert!(split_arguments("   ").is_empty());
    }

    #[test]
    fn request_copies_tile_fields() {
        let tile = TileRecord {
            title: "Term".into(),
            icon_path: "term.png".into(),
            executable: "wt.exe".into(),
            arguments: "-p dev".into(),
            working_directory: "C:\\src".into(),
        };
        let req = LaunchRequest::from(&tile);
        assert_eq!(req.executable, "wt.exe");
        assert_eq!(req.arguments, "-p dev");
        assert_eq!(req.working_directory, "C:\\src");
    }

    #[test]
    fn extension_decides_spawn_or_open() {
        assert!(looks_executable(Path::new("notepad.exe")));
        assert!(looks_executable(Path::new("NOTEPAD.EXE")));
        assert!(looks_executable(Path::new("notepad")));
        assert!(!looks_executable(Path::new("readme.txt")));
    }

    #[test]
    fn missing_executable_is_an_error_not_a_panic() {
        let req = LaunchRequest {
            executable: "definitely-not-a-real-launch-pad-binary.exe".into(),
            arguments: String::new(),
            working_directory: String::new(),
        };
        assert!(ProcessLauncher.launch(&req).is_err());
    }
}
