use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("Error reading {} file at `{}`: {}", .file_description, .path, .original)]
    Yaml {
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("Error writing result: {}", .0)]
    Render(#[from] serde_yaml::Error),
}

impl Error {
    pub fn io_error(file_description: String, path: String, original: std::io::Error) -> Self {
        Self::Io {
            file_description,
            path,
            original,
        }
    }

    pub fn yaml_error(file_description: String, path: String, original: serde_yaml::Error) -> Self {
        Self::Yaml {
            file_description,
            path,
            original,
        }
    }
}
