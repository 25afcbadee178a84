use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::helpers::{get_required_str, require_db, require_teacher};
use crate::ipc::types::{AppState, Request};
use serde_json::json;
use uuid::Uuid;

fn classes_list(state: &AppState) -> Result<serde_json::Value, HandlerErr> {
    require_teacher(&state.viewer)?;
    let Some(conn) = state.db.as_ref() else {
        return Ok(json!({ "classes": [] }));
    };

    // Correlated subquery so the dashboard can show roster sizes.
    let mut stmt = conn
        .prepare(
            "SELECT
               c.id,
               c.name,
               (SELECT COUNT(*) FROM students s WHERE s.class_id = c.id) AS student_count
             FROM classes c
             ORDER BY c.name",
        )
        .map_err(|e| HandlerErr::new("db_query_failed", e.to_string()))?;

    let classes = stmt
        .query_map([], |row| {
            let id: String = row.get(0)?;
            let name: String = row.get(1)?;
            let student_count: i64 = row.get(2)?;
            Ok(json!({
                "id": id,
                "name": name,
                "studentCount": student_count
            }))
        })
        .and_then(|it| it.collect::<Result<Vec<_>, _>>())
        .map_err(|e| HandlerErr::new("db_query_failed", e.to_string()))?;

    Ok(json!({ "classes": classes }))
}

fn classes_create(
    state: &AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    require_teacher(&state.viewer)?;
    let conn = require_db(&state.db)?;
    let name = get_required_str(params, "name")?;

    let class_id = Uuid::new_v4().to_string();
    conn.execute(
        "INSERT INTO classes(id, name) VALUES(?, ?)",
        (&class_id, &name),
    )
    .map_err(|e| {
        HandlerErr::new("db_insert_failed", e.to_string())
            .with_details(json!({ "table": "classes" }))
    })?;

    tracing::info!(class_id = %class_id, name = %name, "class created");
    Ok(json!({ "classId": class_id, "name": name }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "classes.list" => Some(respond(&req.id, classes_list(state))),
        "classes.create" => Some(respond(&req.id, classes_create(state, &req.params))),
        _ => None,
    }
}
