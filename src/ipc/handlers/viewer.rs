use crate::ipc::error::{respond, HandlerErr};
use crate::ipc::helpers::{get_optional_str, get_required_str};
use crate::ipc::types::{AppState, Request};
use crate::viewer::{Role, Viewer};
use serde_json::json;

fn viewer_sign_in(
    state: &mut AppState,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let user_id = get_required_str(params, "userId")?;
    let name = get_required_str(params, "name")?;
    let role_raw = get_required_str(params, "role")?;
    let role = Role::parse(&role_raw)
        .ok_or_else(|| HandlerErr::bad_params("role must be teacher or student"))?;
    let student_id = get_optional_str(params, "studentId");

    let viewer = Viewer::sign_in(&user_id, &name, role, student_id.as_deref())
        .map_err(|e| HandlerErr::bad_params(e.to_string()))?;

    // A new identity never inherits the previous one's unsaved marks.
    state.attendance = None;
    let result = json!({ "viewer": viewer.to_json() });
    tracing::info!(user_id = %user_id, role = ?viewer.role(), "signed in");
    state.viewer = Some(viewer);
    Ok(result)
}

fn viewer_sign_out(state: &mut AppState) -> serde_json::Value {
    let was_signed_in = state.viewer.take().is_some();
    state.attendance = None;
    if was_signed_in {
        tracing::info!("signed out");
    }
    json!({ "signedOut": was_signed_in })
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "viewer.signIn" => Some(respond(&req.id, viewer_sign_in(state, &req.params))),
        "viewer.signOut" => Some(respond(&req.id, Ok(viewer_sign_out(state)))),
        "viewer.current" => Some(respond(
            &req.id,
            Ok(json!({ "viewer": state.viewer.as_ref().map(|v| v.to_json()) })),
        )),
        _ => None,
    }
}
