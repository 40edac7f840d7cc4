/// Boundary between the core and a presentation layer
///
/// Each entry point validates its request, delegates to the core and turns
/// every failure into an [`ApiError`] carrying a message and an HTTP-style
/// status code. Requests and responses are plain serde types so any transport
/// can marshal them.
use crate::actions::{ActionArgs, Dispatcher, FileOutcome};
use crate::browse::{self, DirectoryListing};
use crate::config::Config;
use crate::detail::DetailService;
use crate::errors::DashError;
use crate::launcher::Launcher;
use crate::repo::{RepositoryDetail, RepositorySummary};
use crate::scanner::Scanner;
use crate::vcs::traits::ClientFactory;
use crate::vcs::CommitRecord;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<FileOutcome>>,
    #[serde(skip)]
    pub status: u16,
}

impl ApiError {
    pub fn new(status: u16, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            files: None,
            status,
        }
    }

    pub fn bad_request(error: impl Into<String>) -> Self {
        Self::new(400, error)
    }

    pub fn not_found(error: impl Into<String>) -> Self {
        Self::new(404, error)
    }

    pub fn internal(error: impl Into<String>) -> Self {
        Self::new(500, error)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.error, self.status)
    }
}

impl std::error::Error for ApiError {}

/// Map a core error onto a response, keeping its message
impl From<DashError> for ApiError {
    fn from(e: DashError) -> Self {
        match e {
            DashError::NotFound(_) | DashError::NotARepository(_) => {
                ApiError::not_found(e.to_string())
            }
            DashError::InvalidArgument(msg) => ApiError::bad_request(msg),
            DashError::PartialFailure { ref outcomes, .. } => {
                let files = outcomes.clone();
                ApiError {
                    error: e.to_string(),
                    files: Some(files),
                    status: 500,
                }
            }
            other => ApiError::internal(other.to_string()),
        }
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathRequest {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileRequest {
    pub path: Option<String>,
    pub file: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActionRequest {
    pub path: Option<String>,
    pub action: Option<String>,
    #[serde(default)]
    pub args: Option<ActionArgs>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScanResponse {
    pub repos: Vec<RepositorySummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DetailResponse {
    pub details: RepositoryDetail,
}

#[derive(Debug, Clone, Serialize)]
pub struct DiffResponse {
    pub diff: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryResponse {
    pub history: Vec<CommitRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActionResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<FileOutcome>,
}

/// Treat absent and blank fields alike
fn required(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

pub struct Api<'a> {
    factory: &'a dyn ClientFactory,
    launcher: &'a dyn Launcher,
    config: &'a Config,
}

impl<'a> Api<'a> {
    pub fn new(
        factory: &'a dyn ClientFactory,
        launcher: &'a dyn Launcher,
        config: &'a Config,
    ) -> Self {
        Self {
            factory,
            launcher,
            config,
        }
    }

    pub fn scan_repositories(&self, req: &PathRequest) -> ApiResult<ScanResponse> {
        let path = required(&req.path).ok_or_else(|| ApiError::bad_request("Path is required"))?;

        let scanner = Scanner::new(self.factory, self.config.scan.clone());
        let repos = scanner.scan(Path::new(path)).map_err(|e| {
            tracing::error!(error = %e, "scan failed");
            ApiError::internal("Failed to scan repositories")
        })?;

        Ok(ScanResponse { repos })
    }

    pub fn repository_detail(&self, req: &PathRequest) -> ApiResult<DetailResponse> {
        let path = required(&req.path).ok_or_else(|| ApiError::bad_request("Path is required"))?;

        match self.details().detail(Path::new(path)) {
            Ok(Some(details)) => Ok(DetailResponse { details }),
            Ok(None) | Err(DashError::NotFound(_)) | Err(DashError::NotARepository(_)) => {
                Err(ApiError::not_found("Repository not found"))
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to get repository details");
                Err(ApiError::internal(format!("Failed to get repo details: {}", e)))
            }
        }
    }

    pub fn file_diff(&self, req: &FileRequest) -> ApiResult<DiffResponse> {
        let (path, file) = Self::path_and_file(req)?;
        let diff = self.details().file_diff(Path::new(path), file)?;
        Ok(DiffResponse { diff })
    }

    pub fn file_history(&self, req: &FileRequest) -> ApiResult<HistoryResponse> {
        let (path, file) = Self::path_and_file(req)?;
        let history = self.details().file_history(Path::new(path), file)?;
        Ok(HistoryResponse { history })
    }

    pub fn run_action(&self, req: &ActionRequest) -> ApiResult<ActionResponse> {
        let (Some(path), Some(action)) = (required(&req.path), required(&req.action)) else {
            return Err(ApiError::bad_request("Path and action are required"));
        };

        let args = req.args.clone().unwrap_or_default();
        let dispatcher = Dispatcher::new(self.factory, self.launcher);

        match dispatcher.dispatch(Path::new(path), action, &args) {
            Ok(outcome) => Ok(ActionResponse {
                success: true,
                files: outcome.files,
            }),
            Err(e) => {
                tracing::error!(action, error = %e, "action failed");
                let mut err = ApiError::from(e);
                // The client reports failed actions uniformly
                if err.status == 404 {
                    err.status = 500;
                }
                Err(err)
            }
        }
    }

    pub fn list_directories(&self, path: Option<&str>) -> ApiResult<DirectoryListing> {
        let path = path.map(str::trim).filter(|p| !p.is_empty()).map(Path::new);
        browse::list_directories(path).map_err(|e| match e {
            DashError::NotFound(_) => ApiError::not_found("Path does not exist"),
            other => {
                tracing::error!(error = %other, "failed to read directory");
                ApiError::internal("Failed to read directory")
            }
        })
    }

    fn details(&self) -> DetailService<'a> {
        DetailService::new(self.factory, self.config.detail.clone())
    }

    fn path_and_file(req: &FileRequest) -> ApiResult<(&str, &str)> {
        match (required(&req.path), required(&req.file)) {
            (Some(path), Some(file)) => Ok((path, file)),
            _ => Err(ApiError::bad_request("Path and file are required")),
        }
    }
}
