use anyhow::Result;
use std::path::PathBuf;
use std::process::Command;

#[derive(Debug)]
pub struct Doctor {
    groups: Vec<Group>,
}

impl Default for Doctor {
    fn default() -> Self {
        Self {
            groups: vec![Group {
                name: "imagemagick",
                checks: vec![Check::new(
                    exe!("magick"),
                    Some(VersionCheck::new("--version", 0, 2)),
                )],
            }],
        }
    }
}

impl std::fmt::Display for Doctor {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for group in &self.groups {
            write!(f, "{}", group)?;
        }
        Ok(())
    }
}

#[derive(Debug)]
struct Group {
    name: &'static str,
    checks: Vec<Check>,
}

impl std::fmt::Display for Group {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        writeln!(f, "{:-^1$}", self.name, 60)?;
        for check in &self.checks {
            write!(f, "{:20} ", check.name())?;
            if let Ok(path) = check.path() {
                let version = if let Ok(Some(version)) = check.version() {
                    version
                } else {
                    "unknown".into()
                };
                write!(f, "{:20}", version)?;
                write!(f, "{}", path.display())?;
            } else {
                write!(f, "not found")?;
            }
            writeln!(f)?;
        }
        writeln!(f)
    }
}

#[derive(Debug)]
struct Check {
    name: &'static str,
    version: Option<VersionCheck>,
}

#[derive(Clone, Copy, Debug)]
struct VersionCheck {
    arg: &'static str,
    row: u8,
    col: u8,
}

impl VersionCheck {
    pub const fn new(arg: &'static str, row: u8, col: u8) -> Self {
        Self { arg, row, col }
    }
}

impl Check {
    pub const fn new(name: &'static str, version: Option<VersionCheck>) -> Self {
        Self { name, version }
    }

    fn name(&self) -> &'static str {
        self.name
    }

    fn path(&self) -> Result<PathBuf> {
        Ok(which::which(self.name)?)
    }

    fn version(&self) -> Result<Option<String>> {
        if let Some(version) = self.version {
            let output = Command::new(self.path()?)
                .args(version.arg.split(' '))
                .output()?;
            anyhow::ensure!(output.status.success(), "failed to run {}", self.name);
            let output = std::str::from_utf8(&output.stdout)?;
            if let Some(line) = output.lines().nth(version.row as _) {
                if let Some(col) = line.split(' ').nth(version.col as _) {
                    return Ok(Some(col.to_string()));
                }
            }
            anyhow::bail!("failed to parse version: {:?}", output);
        } else {
            Ok(None)
        }
    }
}

pub fn doctor() {
    let doctor = Doctor::default();
    print!("{}", doctor);
}
