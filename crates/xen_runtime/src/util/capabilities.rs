//! System capability traits for dependency injection.

use std::io::BufRead;
use std::path::{Component, Path};
use std::sync::OnceLock;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

pub trait Clock {
    fn unix_secs(&self) -> f64;
    /// Seconds since the first call in this process.
    fn mono_secs(&self) -> f64;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn unix_secs(&self) -> f64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as f64)
            .unwrap_or(0.0)
    }

    fn mono_secs(&self) -> f64 {
        static START: OnceLock<Instant> = OnceLock::new();
        let start = START.get_or_init(Instant::now);
        start.elapsed().as_secs_f64()
    }
}

pub trait FileSystem {
    fn read_to_string(&self, path: &str) -> Result<String, String>;
    fn exists(&self, path: &str) -> bool;
    fn is_file(&self, path: &str) -> bool;
    fn is_dir(&self, path: &str) -> bool;
    fn create_dir(&self, path: &str) -> Result<(), String>;
    fn remove_dir(&self, path: &str) -> Result<(), String>;
    fn remove_dir_all(&self, path: &str) -> Result<(), String>;
    fn remove_file(&self, path: &str) -> Result<(), String>;
}

pub struct StdFileSystem;

impl FileSystem for StdFileSystem {
    fn read_to_string(&self, path: &str) -> Result<String, String> {
        std::fs::read_to_string(path).map_err(|e| e.to_string())
    }

    fn exists(&self, path: &str) -> bool {
        std::fs::metadata(path).is_ok()
    }

    fn is_file(&self, path: &str) -> bool {
        std::fs::metadata(path).map(|m| m.is_file()).unwrap_or(false)
    }

    fn is_dir(&self, path: &str) -> bool {
        std::fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false)
    }

    fn create_dir(&self, path: &str) -> Result<(), String> {
        std::fs::create_dir(path).map_err(|e| e.to_string())
    }

    fn remove_dir(&self, path: &str) -> Result<(), String> {
        std::fs::remove_dir(path).map_err(|e| e.to_string())
    }

    fn remove_dir_all(&self, path: &str) -> Result<(), String> {
        std::fs::remove_dir_all(path).map_err(|e| e.to_string())
    }

    fn remove_file(&self, path: &str) -> Result<(), String> {
        std::fs::remove_file(path).map_err(|e| e.to_string())
    }
}

pub trait RngAlgorithm {
    fn next_u64(&self, state: &mut u64) -> u64;
}

pub struct Lcg64;

impl RngAlgorithm for Lcg64 {
    fn next_u64(&self, state: &mut u64) -> u64 {
        *state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
        *state
    }
}

pub trait LineReader {
    /// Next line without its terminator, `None` at end of input.
    fn read_line(&mut self) -> Option<String>;
}

pub struct StdinReader;

impl LineReader for StdinReader {
    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match std::io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => {
                if line.ends_with('\n') {
                    line.pop();
                    if line.ends_with('\r') {
                        line.pop();
                    }
                }
                Some(line)
            }
        }
    }
}

pub struct Capabilities {
    pub clock: Box<dyn Clock>,
    pub fs: Box<dyn FileSystem>,
    pub rng: Box<dyn RngAlgorithm>,
    pub input: Box<dyn LineReader>,
    /// When non-empty, filesystem natives only touch paths under one of these.
    pub allowed_roots: Vec<String>,
}

impl Capabilities {
    pub fn path_allowed(&self, path: &str) -> bool {
        if self.allowed_roots.is_empty() {
            return true;
        }
        let candidate = Path::new(path);
        if candidate.components().any(|c| matches!(c, Component::ParentDir)) {
            return false;
        }
        self.allowed_roots
            .iter()
            .any(|root| candidate.starts_with(Path::new(root)))
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            clock: Box::new(SystemClock),
            fs: Box::new(StdFileSystem),
            rng: Box::new(Lcg64),
            input: Box::new(StdinReader),
            allowed_roots: Vec::new(),
        }
    }
}
