use crate::config::CachePolicy;
use crate::config::ListPosition;
use crate::config::ListTarget;
use crate::config::PaginateMode;
use crate::store::StoreError;
use rusqlite::Connection;
use rusqlite::OptionalExtension;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Project-wide settings that shape every artifact.
///
/// Read from the store's single `config` row together with
/// `runtime_scalar_definitions`. Every field has a default so a partial
/// JSON config file deserializes.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectConfig {
    pub default_cache_policy: CachePolicy,
    pub default_fragment_masking: bool,
    pub default_keys: Vec<String>,
    pub default_list_position: ListPosition,
    pub default_list_target: ListTarget,
    pub default_paginate_mode: PaginateMode,
    pub default_partial: bool,
    pub project_root: PathBuf,
    pub runtime_dir: String,
    /// Runtime scalar name to the schema scalar it is sent as.
    pub runtime_scalars: BTreeMap<String, String>,
    pub suppress_pagination_deduplication: bool,
}
impl ProjectConfig {
    /// `<project_root>/<runtime_dir>/artifacts`
    pub fn artifact_directory(&self) -> PathBuf {
        self.project_root.join(&self.runtime_dir).join("artifacts")
    }

    pub fn artifact_path(&self, document_name: &str) -> PathBuf {
        self.artifact_directory().join(format!("{document_name}.js"))
    }

    pub fn load(conn: &Connection) -> Result<Self, StoreError> {
        let row = conn
            .query_row(
                "SELECT project_root, runtime_dir, default_cache_policy, default_partial,
                        default_fragment_masking, default_keys, default_paginate_mode,
                        default_list_position, default_list_target,
                        suppress_pagination_deduplication
                 FROM config WHERE id = 1",
                [],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, bool>(3)?,
                        row.get::<_, bool>(4)?,
                        row.get::<_, String>(5)?,
                        row.get::<_, String>(6)?,
                        row.get::<_, String>(7)?,
                        row.get::<_, String>(8)?,
                        row.get::<_, bool>(9)?,
                    ))
                },
            )
            .optional()?;
        let Some((
            project_root,
            runtime_dir,
            cache_policy,
            default_partial,
            default_fragment_masking,
            default_keys,
            paginate_mode,
            list_position,
            list_target,
            suppress_pagination_deduplication,
        )) = row
        else {
            return Err(StoreError::MissingConfig);
        };

        let mut runtime_scalars = BTreeMap::new();
        let mut stmt = conn.prepare(
            "SELECT name, type FROM runtime_scalar_definitions ORDER BY name",
        )?;
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            runtime_scalars.insert(row.get::<_, String>(0)?, row.get::<_, String>(1)?);
        }

        Ok(Self {
            default_cache_policy: CachePolicy::parse(&cache_policy).ok_or(
                StoreError::InvalidConfig {
                    setting: "default_cache_policy",
                    value: cache_policy.clone(),
                },
            )?,
            default_fragment_masking,
            default_keys: serde_json::from_str(&default_keys).map_err(|_| {
                StoreError::InvalidConfig {
                    setting: "default_keys",
                    value: default_keys.clone(),
                }
            })?,
            default_list_position: ListPosition::parse(&list_position).ok_or(
                StoreError::InvalidConfig {
                    setting: "default_list_position",
                    value: list_position.clone(),
                },
            )?,
            default_list_target: ListTarget::parse(&list_target).ok_or(
                StoreError::InvalidConfig {
                    setting: "default_list_target",
                    value: list_target.clone(),
                },
            )?,
            default_paginate_mode: PaginateMode::parse(&paginate_mode).ok_or(
                StoreError::InvalidConfig {
                    setting: "default_paginate_mode",
                    value: paginate_mode.clone(),
                },
            )?,
            default_partial,
            project_root: PathBuf::from(project_root),
            runtime_dir,
            runtime_scalars,
            suppress_pagination_deduplication,
        })
    }

    /// Replaces the stored config row and runtime scalar definitions.
    pub fn save(&self, conn: &Connection) -> Result<(), StoreError> {
        let default_keys = serde_json::to_string(&self.default_keys).map_err(|_| {
            StoreError::InvalidConfig {
                setting: "default_keys",
                value: self.default_keys.join(","),
            }
        })?;
        conn.execute(
            "INSERT OR REPLACE INTO config (
                id, project_root, runtime_dir, default_cache_policy, default_partial,
                default_fragment_masking, default_keys, default_paginate_mode,
                default_list_position, default_list_target,
                suppress_pagination_deduplication
             ) VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            rusqlite::params![
                self.project_root.to_string_lossy().into_owned(),
                self.runtime_dir,
                self.default_cache_policy.as_str(),
                self.default_partial,
                self.default_fragment_masking,
                default_keys,
                self.default_paginate_mode.as_str(),
                self.default_list_position.as_str(),
                self.default_list_target.as_str(),
                self.suppress_pagination_deduplication,
            ],
        )?;
        conn.execute("DELETE FROM runtime_scalar_definitions", [])?;
        let mut insert = conn.prepare(
            "INSERT INTO runtime_scalar_definitions (name, type) VALUES (?1, ?2)",
        )?;
        for (name, scalar) in &self.runtime_scalars {
            insert.execute([name, scalar])?;
        }
        Ok(())
    }
}
impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            default_cache_policy: CachePolicy::default(),
            default_fragment_masking: true,
            default_keys: vec!["id".to_string()],
            default_list_position: ListPosition::default(),
            default_list_target: ListTarget::default(),
            default_paginate_mode: PaginateMode::default(),
            default_partial: false,
            project_root: PathBuf::from("."),
            runtime_dir: "$houdini".to_string(),
            runtime_scalars: BTreeMap::new(),
            suppress_pagination_deduplication: false,
        }
    }
}
