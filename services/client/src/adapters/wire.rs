//! services/client/src/adapters/wire.rs
//!
//! JSON shapes of the project REST API and their mapping to the core domain.

use chrono::NaiveDate;
use protech_core::domain::{Project, ProjectDetails, ProjectId};
use protech_core::draft::parse_calendar_date;
use protech_core::ports::PortError;
use serde::{Deserialize, Serialize};

//=========================================================================================
// "Impure" Wire Record Structs
//=========================================================================================

/// Ids arrive as strings from some backends and as numbers from others.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum WireId {
    Text(String),
    Number(i64),
}

impl WireId {
    fn into_string(self) -> String {
        match self {
            WireId::Text(s) => s,
            WireId::Number(n) => n.to_string(),
        }
    }
}

/// A project as the server returns it.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectRecord {
    #[serde(rename = "ProjectId", default)]
    project_id: Option<WireId>,
    #[serde(rename = "_id", default)]
    object_id: Option<WireId>,
    #[serde(rename = "ProjectTitle", default)]
    title: String,
    #[serde(rename = "ProjectDescription", default)]
    description: String,
    #[serde(rename = "StartDate")]
    start_date: String,
    #[serde(rename = "EndDate")]
    end_date: String,
    #[serde(rename = "FrontEndTechStack", default)]
    frontend_stack: String,
    #[serde(rename = "BackendTechStack", default)]
    backend_stack: String,
    #[serde(rename = "Database", default)]
    database: String,
    #[serde(rename = "Status", default)]
    status: String,
    #[serde(rename = "CoverImage", default)]
    cover_image: String,
}

impl ProjectRecord {
    pub fn into_domain(self) -> Result<Project, PortError> {
        let non_empty = |id: Option<WireId>| id.map(WireId::into_string).filter(|s| !s.is_empty());
        let id = non_empty(self.project_id)
            .or_else(|| non_empty(self.object_id))
            .ok_or_else(|| PortError::Decode("project without ProjectId or _id".to_string()))?;

        let start_date = parse_date("StartDate", &self.start_date)?;
        let end_date = parse_date("EndDate", &self.end_date)?;

        Ok(Project {
            id: ProjectId(id),
            details: ProjectDetails {
                title: self.title,
                description: self.description,
                start_date,
                end_date,
                frontend_stack: self.frontend_stack,
                backend_stack: self.backend_stack,
                database: self.database,
                status: self.status,
                cover_image: self.cover_image,
            },
        })
    }
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate, PortError> {
    parse_calendar_date(value)
        .ok_or_else(|| PortError::Decode(format!("{} is not a date: {:?}", field, value)))
}

/// The body of a create or update request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectPayload<'a> {
    #[serde(rename = "ProjectTitle")]
    pub title: &'a str,
    #[serde(rename = "ProjectDescription")]
    pub description: &'a str,
    /// Serialised as `YYYY-MM-DD`.
    #[serde(rename = "StartDate")]
    pub start_date: NaiveDate,
    #[serde(rename = "EndDate")]
    pub end_date: NaiveDate,
    #[serde(rename = "FrontEndTechStack")]
    pub frontend_stack: &'a str,
    #[serde(rename = "BackendTechStack")]
    pub backend_stack: &'a str,
    #[serde(rename = "Database")]
    pub database: &'a str,
    #[serde(rename = "Status")]
    pub status: &'a str,
    #[serde(rename = "CoverImage")]
    pub cover_image: &'a str,
}

impl<'a> From<&'a ProjectDetails> for ProjectPayload<'a> {
    fn from(d: &'a ProjectDetails) -> Self {
        Self {
            title: &d.title,
            description: &d.description,
            start_date: d.start_date,
            end_date: d.end_date,
            frontend_stack: &d.frontend_stack,
            backend_stack: &d.backend_stack,
            database: &d.database,
            status: &d.status,
            cover_image: &d.cover_image,
        }
    }
}

pub fn decode_project(body: &[u8]) -> Result<Project, PortError> {
    let record: ProjectRecord =
        serde_json::from_slice(body).map_err(|e| PortError::Decode(e.to_string()))?;
    record.into_domain()
}

pub fn decode_projects(body: &[u8]) -> Result<Vec<Project>, PortError> {
    let records: Vec<ProjectRecord> =
        serde_json::from_slice(body).map_err(|e| PortError::Decode(e.to_string()))?;
    records.into_iter().map(ProjectRecord::into_domain).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wire(id_key: &str, id: serde_json::Value) -> serde_json::Value {
        json!({
            id_key: id,
            "ProjectTitle": "Alpha",
            "ProjectDescription": "Inventory tracker",
            "StartDate": "2024-01-05T00:00:00.000Z",
            "EndDate": "2024-03-01",
            "FrontEndTechStack": "React",
            "BackendTechStack": "Express",
            "Database": "MongoDB",
            "Status": "Active",
            "CoverImage": "data:image/png;base64,AAAA"
        })
    }

    #[test]
    fn accepts_either_id_key_and_numeric_ids() {
        let body = serde_json::to_vec(&wire("_id", json!("65af"))).unwrap();
        assert_eq!(decode_project(&body).unwrap().id, ProjectId::from("65af"));

        let body = serde_json::to_vec(&wire("ProjectId", json!(17))).unwrap();
        let project = decode_project(&body).unwrap();
        assert_eq!(project.id, ProjectId::from("17"));
        assert_eq!(project.details.start_date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
    }

    #[test]
    fn prefers_project_id_when_both_are_present() {
        let mut value = wire("_id", json!("mongo"));
        value["ProjectId"] = json!(3);
        let body = serde_json::to_vec(&value).unwrap();
        assert_eq!(decode_project(&body).unwrap().id, ProjectId::from("3"));
    }

    #[test]
    fn blank_project_id_falls_back_to_object_id() {
        let mut value = wire("_id", json!("65af"));
        value["ProjectId"] = json!("");
        let body = serde_json::to_vec(&value).unwrap();
        assert_eq!(decode_project(&body).unwrap().id, ProjectId::from("65af"));
    }

    #[test]
    fn records_without_an_id_are_rejected() {
        let mut value = wire("_id", json!("x"));
        value.as_object_mut().unwrap().remove("_id");
        let body = serde_json::to_vec(&value).unwrap();
        assert!(matches!(decode_project(&body), Err(PortError::Decode(_))));
    }

    #[test]
    fn payload_uses_wire_names_and_plain_dates() {
        let body = serde_json::to_vec(&wire("_id", json!("x"))).unwrap();
        let project = decode_project(&body).unwrap();

        let payload = serde_json::to_value(ProjectPayload::from(&project.details)).unwrap();
        assert_eq!(
            payload,
            json!({
                "ProjectTitle": "Alpha",
                "ProjectDescription": "Inventory tracker",
                "StartDate": "2024-01-05",
                "EndDate": "2024-03-01",
                "FrontEndTechStack": "React",
                "BackendTechStack": "Express",
                "Database": "MongoDB",
                "Status": "Active",
                "CoverImage": "data:image/png;base64,AAAA"
            })
        );
    }
}
