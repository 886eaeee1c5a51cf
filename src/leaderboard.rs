//! Leaderboard collaborator: the single-endpoint JSON action protocol and a service
//! backed by an in-memory store that can be persisted as a JSON file.

use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::foundation::error::{CellGlyphError, CellGlyphResult};

/// Rows returned by `getBestScores`.
pub const BEST_SCORES_LIMIT: usize = 5;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
}

/// One user's best-score row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub user_id: u64,
    pub score: i64,
    /// Seconds.
    pub time: u64,
    pub size: u32,
    pub difficulty: u32,
}

impl Score {
    pub fn empty(user_id: u64) -> Self {
        Self {
            user_id,
            score: 0,
            time: 0,
            size: 0,
            difficulty: 0,
        }
    }
}

/// Request body; the `action` field selects the variant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum ApiRequest {
    CreateUser {
        name: String,
    },
    UpdateScore {
        name: String,
        time: u64,
        size: u32,
        difficulty: u32,
    },
    GetBestScores,
    GetUserName {
        id: u64,
    },
}

impl ApiRequest {
    /// Whether handling this request can change stored users or scores.
    pub fn is_mutating(&self) -> bool {
        matches!(self, Self::CreateUser { .. } | Self::UpdateScore { .. })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApiResponse {
    User(User),
    Updated(bool),
    Scores(Vec<Score>),
    Name(String),
}

pub trait LeaderboardService {
    /// Existing user with this name, or a newly created one.
    fn create_user(&mut self, name: &str) -> CellGlyphResult<User>;

    /// Overwrite the user's time, size and difficulty, creating the row if needed.
    fn update_score(
        &mut self,
        name: &str,
        time: u64,
        size: u32,
        difficulty: u32,
    ) -> CellGlyphResult<()>;

    fn best_scores(&self) -> CellGlyphResult<Vec<Score>>;

    fn user_name(&self, id: u64) -> CellGlyphResult<String>;
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryStore {
    users: Vec<User>,
    scores: Vec<Score>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a store file; a missing file is an empty store.
    pub fn load(path: &Path) -> CellGlyphResult<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "store file missing, starting empty");
            return Ok(Self::default());
        }
        let bytes =
            std::fs::read(path).with_context(|| format!("read store '{}'", path.display()))?;
        let store: Self = serde_json::from_slice(&bytes)?;
        tracing::debug!(
            users = store.users.len(),
            scores = store.scores.len(),
            "store loaded"
        );
        Ok(store)
    }

    pub fn save(&self, path: &Path) -> CellGlyphResult<()> {
        let json = serde_json::to_vec_pretty(self)?;
        std::fs::write(path, json).with_context(|| format!("write store '{}'", path.display()))?;
        tracing::debug!(path = %path.display(), "store saved");
        Ok(())
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn scores(&self) -> &[Score] {
        &self.scores
    }

    /// Insert or replace a score row keyed by `user_id`.
    pub fn set_score(&mut self, score: Score) {
        match self.scores.iter_mut().find(|s| s.user_id == score.user_id) {
            Some(row) => *row = score,
            None => self.scores.push(score),
        }
    }

    fn user_by_name(&self, name: &str) -> Option<&User> {
        self.users.iter().find(|u| u.name == name)
    }
}

impl LeaderboardService for MemoryStore {
    fn create_user(&mut self, name: &str) -> CellGlyphResult<User> {
        if name.is_empty() {
            return Err(CellGlyphError::validation("user name must not be empty"));
        }
        if let Some(user) = self.user_by_name(name) {
            return Ok(user.clone());
        }

        let id = self.users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        let user = User {
            id,
            name: name.to_owned(),
        };
        self.users.push(user.clone());
        Ok(user)
    }

    fn update_score(
        &mut self,
        name: &str,
        time: u64,
        size: u32,
        difficulty: u32,
    ) -> CellGlyphResult<()> {
        let user_id = self
            .user_by_name(name)
            .map(|u| u.id)
            .ok_or_else(|| CellGlyphError::unknown_user(name))?;

        let mut score = self
            .scores
            .iter()
            .find(|s| s.user_id == user_id)
            .copied()
            .unwrap_or_else(|| Score::empty(user_id));
        score.time = time;
        score.size = size;
        score.difficulty = difficulty;

        self.set_score(score);
        Ok(())
    }

    fn best_scores(&self) -> CellGlyphResult<Vec<Score>> {
        let mut rows = self.scores.clone();
        rows.sort_by(|a, b| b.score.cmp(&a.score));
        rows.truncate(BEST_SCORES_LIMIT);
        Ok(rows)
    }

    fn user_name(&self, id: u64) -> CellGlyphResult<String> {
        self.users
            .iter()
            .find(|u| u.id == id)
            .map(|u| u.name.clone())
            .ok_or_else(|| CellGlyphError::unknown_user(id.to_string()))
    }
}

/// Dispatch one action to the service.
#[tracing::instrument(skip(service))]
pub fn handle(
    service: &mut dyn LeaderboardService,
    request: ApiRequest,
) -> CellGlyphResult<ApiResponse> {
    match request {
        ApiRequest::CreateUser { name } => service.create_user(&name).map(ApiResponse::User),
        ApiRequest::UpdateScore {
            name,
            time,
            size,
            difficulty,
        } => {
            service.update_score(&name, time, size, difficulty)?;
            Ok(ApiResponse::Updated(true))
        }
        ApiRequest::GetBestScores => service.best_scores().map(ApiResponse::Scores),
        ApiRequest::GetUserName { id } => service.user_name(id).map(ApiResponse::Name),
    }
}

/// [`handle`] over JSON text: request body in, response body out.
pub fn handle_json(service: &mut dyn LeaderboardService, body: &str) -> CellGlyphResult<String> {
    let request: ApiRequest = serde_json::from_str(body)?;
    let response = handle(service, request)?;
    Ok(serde_json::to_string(&response)?)
}

#[cfg(test)]
#[path = "../tests/unit/leaderboard/service.rs"]
mod tests;
