//! `Projects` table persistence.

use super::{EntityStore, RepoResult};
use crate::model::project::Project;
use crate::model::ProjectId;
use rusqlite::{params, Connection, Row};

/// SQLite-backed project table.
pub struct ProjectStore;

impl EntityStore for ProjectStore {
    type Record = Project;
    type Key = ProjectId;

    const ENTITY: &'static str = "project";

    fn list_all(conn: &Connection) -> RepoResult<Vec<Project>> {
        let mut stmt = conn.prepare(
            "SELECT ProjectID, ProjectName, ManagerEmployeeID
             FROM Projects
             ORDER BY ProjectID;",
        )?;
        let projects = stmt
            .query_map([], parse_project_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(projects)
    }

    fn insert(conn: &Connection, project: &Project) -> RepoResult<ProjectId> {
        project.validate()?;

        conn.execute(
            "INSERT INTO Projects (ProjectID, ProjectName, ManagerEmployeeID)
             VALUES (?1, ?2, ?3);",
            params![project.id, project.name.as_str(), project.manager_id],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn update(conn: &Connection, id: ProjectId, project: &Project) -> RepoResult<usize> {
        project.validate()?;

        let changed = conn.execute(
            "UPDATE Projects
             SET
                ProjectName = ?1,
                ManagerEmployeeID = ?2
             WHERE ProjectID = ?3;",
            params![project.name.as_str(), project.manager_id, id],
        )?;
        Ok(changed)
    }

    fn delete(conn: &Connection, id: ProjectId) -> RepoResult<usize> {
        let removed = conn.execute("DELETE FROM Projects WHERE ProjectID = ?1;", [id])?;
        Ok(removed)
    }
}

fn parse_project_row(row: &Row<'_>) -> rusqlite::Result<Project> {
    Ok(Project {
        id: Some(row.get("ProjectID")?),
        name: row.get("ProjectName")?,
        manager_id: row.get("ManagerEmployeeID")?,
    })
}
