//! Per-command handlers: the backend-call step between decode and encode.
//!
//! Handlers never touch the connection; they consume a [`Request`], call
//! the matching backend operation, and produce an [`Outcome`]. Pre/post
//! bookkeeping (status flush, lifecycle transition, end-of-response) is the
//! dispatcher's job.

use tracing::warn;

use vcbridge_backend::{AssetList, Backend, BackendResult};
use vcbridge_core::{Severity, StatusList};

use crate::error::{EngineError, EngineResult};
use crate::registry::Outcome;
use crate::request::Request;
use crate::response::Response;
use crate::session::{select_version, Session, SUPPORTED_VERSIONS};

fn contract(name: &'static str) -> EngineError {
    EngineError::Contract(name)
}

fn asset_op<F>(req: Request, status: &mut StatusList, op: F) -> EngineResult<Outcome>
where
    F: FnOnce(&mut AssetList, &mut StatusList) -> BackendResult<bool>,
{
    let Request::Assets { mut assets } = req else {
        return Err(contract("asset operation"));
    };
    let success = op(&mut assets, status)?;
    Ok(Outcome {
        success,
        response: Response::Assets(assets),
    })
}

pub fn handle_add<B: Backend>(
    backend: &mut B,
    req: Request,
    _session: &mut Session,
    status: &mut StatusList,
) -> EngineResult<Outcome> {
    asset_op(req, status, |assets, status| {
        backend.add_assets(assets, status)
    })
}

pub fn handle_checkout<B: Backend>(
    backend: &mut B,
    req: Request,
    _session: &mut Session,
    status: &mut StatusList,
) -> EngineResult<Outcome> {
    asset_op(req, status, |assets, status| {
        backend.checkout_assets(assets, status)
    })
}

pub fn handle_delete<B: Backend>(
    backend: &mut B,
    req: Request,
    _session: &mut Session,
    status: &mut StatusList,
) -> EngineResult<Outcome> {
    asset_op(req, status, |assets, status| {
        backend.remove_assets(assets, status)
    })
}

/// `download` and `getLatest` both fetch through `get_assets`; requested
/// revisions ride on each asset.
pub fn handle_get<B: Backend>(
    backend: &mut B,
    req: Request,
    _session: &mut Session,
    status: &mut StatusList,
) -> EngineResult<Outcome> {
    asset_op(req, status, |assets, status| {
        backend.get_assets(assets, status)
    })
}

pub fn handle_lock<B: Backend>(
    backend: &mut B,
    req: Request,
    _session: &mut Session,
    status: &mut StatusList,
) -> EngineResult<Outcome> {
    asset_op(req, status, |assets, status| {
        backend.lock_assets(assets, status)
    })
}

pub fn handle_unlock<B: Backend>(
    backend: &mut B,
    req: Request,
    _session: &mut Session,
    status: &mut StatusList,
) -> EngineResult<Outcome> {
    asset_op(req, status, |assets, status| {
        backend.unlock_assets(assets, status)
    })
}

pub fn handle_resolve<B: Backend>(
    backend: &mut B,
    req: Request,
    _session: &mut Session,
    status: &mut StatusList,
) -> EngineResult<Outcome> {
    let Request::Resolve { mut assets, method } = req else {
        return Err(contract("resolve"));
    };
    let success = backend.resolve_assets(&mut assets, method, status)?;
    Ok(Outcome {
        success,
        response: Response::Assets(assets),
    })
}

pub fn handle_revert<B: Backend>(
    backend: &mut B,
    req: Request,
    _session: &mut Session,
    status: &mut StatusList,
) -> EngineResult<Outcome> {
    let Request::Revert {
        mut assets,
        unchanged_only,
    } = req
    else {
        return Err(contract("revert"));
    };
    let success = backend.revert_assets(&mut assets, unchanged_only, status)?;
    Ok(Outcome {
        success,
        response: Response::Assets(assets),
    })
}

pub fn handle_file_mode<B: Backend>(
    backend: &mut B,
    req: Request,
    _session: &mut Session,
    status: &mut StatusList,
) -> EngineResult<Outcome> {
    let Request::FileMode { mut assets, mode } = req else {
        return Err(contract("fileMode"));
    };
    let success = backend.set_assets_file_mode(&mut assets, mode, status)?;
    Ok(Outcome {
        success,
        response: Response::Assets(assets),
    })
}

pub fn handle_status<B: Backend>(
    backend: &mut B,
    req: Request,
    _session: &mut Session,
    status: &mut StatusList,
) -> EngineResult<Outcome> {
    let Request::StatusQuery {
        mut assets,
        recursive,
    } = req
    else {
        return Err(contract("status"));
    };
    let success = backend.get_assets_status(&mut assets, recursive, status)?;
    Ok(Outcome {
        success,
        response: Response::Assets(assets),
    })
}

pub fn handle_move<B: Backend>(
    backend: &mut B,
    req: Request,
    _session: &mut Session,
    status: &mut StatusList,
) -> EngineResult<Outcome> {
    let Request::Move { pairs } = req else {
        return Err(contract("move"));
    };
    let mut moved = AssetList::new();
    let success = backend.move_assets(&pairs, &mut moved, status)?;
    Ok(Outcome {
        success,
        response: Response::Assets(moved),
    })
}

pub fn handle_submit<B: Backend>(
    backend: &mut B,
    req: Request,
    _session: &mut Session,
    status: &mut StatusList,
) -> EngineResult<Outcome> {
    let Request::Submit { change, mut assets } = req else {
        return Err(contract("submit"));
    };
    let success = backend.submit_assets(&change, &mut assets, status)?;
    Ok(Outcome {
        success,
        response: Response::Assets(assets),
    })
}

pub fn handle_change_status<B: Backend>(
    backend: &mut B,
    req: Request,
    _session: &mut Session,
    status: &mut StatusList,
) -> EngineResult<Outcome> {
    let Request::Revision { revision } = req else {
        return Err(contract("changeStatus"));
    };
    let mut assets = AssetList::new();
    let success = backend.get_assets_change_status(&revision, &mut assets, status)?;
    Ok(Outcome {
        success,
        response: Response::Assets(assets),
    })
}

pub fn handle_incoming_change_assets<B: Backend>(
    backend: &mut B,
    req: Request,
    _session: &mut Session,
    status: &mut StatusList,
) -> EngineResult<Outcome> {
    let Request::Revision { revision } = req else {
        return Err(contract("incomingChangeAssets"));
    };
    let mut assets = AssetList::new();
    let success = backend.get_incoming_assets_change_status(&revision, &mut assets, status)?;
    Ok(Outcome {
        success,
        response: Response::Assets(assets),
    })
}

pub fn handle_change_description<B: Backend>(
    backend: &mut B,
    req: Request,
    _session: &mut Session,
    status: &mut StatusList,
) -> EngineResult<Outcome> {
    let Request::Revision { revision } = req else {
        return Err(contract("changeDescription"));
    };
    let description = backend.get_change_description(&revision, status)?;
    Ok(Outcome {
        success: !status.has_errors(),
        response: Response::Text(description),
    })
}

pub fn handle_change_move<B: Backend>(
    backend: &mut B,
    req: Request,
    _session: &mut Session,
    status: &mut StatusList,
) -> EngineResult<Outcome> {
    let Request::ChangeMove {
        revision,
        mut assets,
    } = req
    else {
        return Err(contract("changeMove"));
    };
    let success = backend.update_revision(&mut assets, &revision, status)?;
    Ok(Outcome {
        success,
        response: Response::Assets(assets),
    })
}

pub fn handle_delete_changes<B: Backend>(
    backend: &mut B,
    req: Request,
    _session: &mut Session,
    status: &mut StatusList,
) -> EngineResult<Outcome> {
    let Request::Revisions { revisions } = req else {
        return Err(contract("deleteChanges"));
    };
    let mut success = true;
    for revision in &revisions {
        success &= backend.delete_revision(revision, status)?;
    }
    Ok(Outcome {
        success,
        response: Response::None,
    })
}

pub fn handle_changes<B: Backend>(
    backend: &mut B,
    req: Request,
    _session: &mut Session,
    status: &mut StatusList,
) -> EngineResult<Outcome> {
    let Request::Empty = req else {
        return Err(contract("changes"));
    };
    let mut changes = Vec::new();
    let success = backend.get_assets_changes(&mut changes, status)?;
    Ok(Outcome {
        success,
        response: Response::Changes(changes),
    })
}

pub fn handle_login<B: Backend>(
    backend: &mut B,
    req: Request,
    _session: &mut Session,
    status: &mut StatusList,
) -> EngineResult<Outcome> {
    let Request::Empty = req else {
        return Err(contract("login"));
    };
    let success = backend.connect(status)?;
    Ok(Outcome {
        success,
        response: Response::None,
    })
}

pub fn handle_query_config_parameters<B: Backend>(
    backend: &mut B,
    req: Request,
    _session: &mut Session,
    _status: &mut StatusList,
) -> EngineResult<Outcome> {
    let Request::Empty = req else {
        return Err(contract("queryConfigParameters"));
    };
    let names: Vec<String> = backend
        .config_fields()
        .iter()
        .filter(|field| field.needs_value())
        .map(|field| field.name.clone())
        .collect();
    Ok(Outcome {
        success: true,
        response: Response::FieldNames(names),
    })
}

pub fn handle_custom<B: Backend>(
    backend: &mut B,
    req: Request,
    _session: &mut Session,
    status: &mut StatusList,
) -> EngineResult<Outcome> {
    let Request::Custom { name } = req else {
        return Err(contract("customCommand"));
    };
    if !backend.custom_commands().iter().any(|c| c.name == name) {
        status.add(Severity::Error, format!("unknown custom command {name}"));
        return Ok(Outcome {
            success: false,
            response: Response::None,
        });
    }
    let success = backend.perform_custom_command(&name, status)?;
    Ok(Outcome {
        success,
        response: Response::None,
    })
}

pub fn handle_exit<B: Backend>(
    _backend: &mut B,
    req: Request,
    _session: &mut Session,
    _status: &mut StatusList,
) -> EngineResult<Outcome> {
    let Request::Empty = req else {
        return Err(contract("exit"));
    };
    Ok(Outcome {
        success: true,
        response: Response::None,
    })
}

/// The config handshake. Reserved keys drive negotiation; anything
/// matching `vc<Plugin><Field>` sets a declared field; unknown keys warn
/// but never abort.
pub fn handle_config<B: Backend>(
    backend: &mut B,
    req: Request,
    session: &mut Session,
    status: &mut StatusList,
) -> EngineResult<Outcome> {
    let Request::Config { key, values } = req else {
        return Err(contract("pluginConfig"));
    };
    let value = values.join(" ");

    match key.as_str() {
        "projectPath" => {
            session.set_project_path(value);
            ok_none()
        }
        "pluginVersions" => {
            let host: Vec<i32> = values
                .iter()
                .filter_map(|v| match v.parse() {
                    Ok(n) => Some(n),
                    Err(_) => {
                        status.add(Severity::Warn, format!("ignoring bad version token {v}"));
                        None
                    }
                })
                .collect();
            let selected = select_version(&host, SUPPORTED_VERSIONS);
            if selected < 0 {
                session.negotiation_failed = true;
                status.add(
                    Severity::Error,
                    "no common protocol version with host, negotiation failed",
                );
            } else {
                session.negotiated_version = Some(selected);
            }
            Ok(Outcome {
                success: selected >= 0,
                response: Response::Text(selected.to_string()),
            })
        }
        "pluginTraits" => {
            if session.negotiation_failed {
                status.add(
                    Severity::Error,
                    "pluginTraits refused: version negotiation failed",
                );
                return Ok(Outcome {
                    success: false,
                    response: Response::None,
                });
            }
            Ok(Outcome {
                success: true,
                response: Response::Traits {
                    traits: backend.plugin_traits(),
                    fields: backend.config_fields().to_vec(),
                    custom: backend.custom_commands().to_vec(),
                    overlays: backend.overlays(),
                },
            })
        }
        "vcSharedLogLevel" => {
            session.set_log_level(&value);
            ok_none()
        }
        "end" => {
            backend.disconnect();
            ok_none()
        }
        other => {
            let prefix = format!("vc{}", backend.name());
            match other.strip_prefix(&prefix) {
                Some(field) if !field.is_empty() => {
                    if !backend.set_config_value(field, &value) {
                        warn!(field, "config value for undeclared field");
                        status.add(Severity::Warn, format!("unknown config field {field}"));
                    }
                    ok_none()
                }
                _ => {
                    status.add(Severity::Warn, format!("unknown config key {other}"));
                    ok_none()
                }
            }
        }
    }
}

fn ok_none() -> EngineResult<Outcome> {
    Ok(Outcome {
        success: true,
        response: Response::None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use vcbridge_backend::StubBackend;

    fn connected_stub() -> StubBackend {
        let mut backend = StubBackend::new();
        let mut status = StatusList::new();
        backend.connect(&mut status).unwrap();
        backend
    }

    #[test]
    fn test_config_project_path() {
        let mut backend = StubBackend::new();
        let mut session = Session::new();
        let mut status = StatusList::new();
        let req = Request::Config {
            key: "projectPath".to_string(),
            values: vec!["/work/proj".to_string()],
        };
        let outcome = handle_config(&mut backend, req, &mut session, &mut status).unwrap();
        assert!(outcome.success);
        assert_eq!(session.project_path, "/work/proj");
    }

    #[test]
    fn test_config_version_negotiation() {
        let mut backend = StubBackend::new();
        let mut session = Session::new();
        let mut status = StatusList::new();

        let req = Request::Config {
            key: "pluginVersions".to_string(),
            values: vec!["1".to_string(), "2".to_string()],
        };
        let outcome = handle_config(&mut backend, req, &mut session, &mut status).unwrap();
        assert!(outcome.success);
        assert!(matches!(outcome.response, Response::Text(ref t) if t == "2"));
        assert_eq!(session.negotiated_version, Some(2));
    }

    #[test]
    fn test_config_version_negotiation_disjoint_fails() {
        let mut backend = StubBackend::new();
        let mut session = Session::new();
        let mut status = StatusList::new();

        let req = Request::Config {
            key: "pluginVersions".to_string(),
            values: vec!["5".to_string()],
        };
        let outcome = handle_config(&mut backend, req, &mut session, &mut status).unwrap();
        assert!(!outcome.success);
        assert!(matches!(outcome.response, Response::Text(ref t) if t == "-1"));
        assert!(session.negotiation_failed);
        assert!(status.has_errors());

        // Negotiation failure is fatal to further negotiation.
        let req = Request::Config {
            key: "pluginTraits".to_string(),
            values: vec![],
        };
        let outcome = handle_config(&mut backend, req, &mut session, &mut status).unwrap();
        assert!(!outcome.success);
    }

    #[test]
    fn test_config_field_setter_and_unknown_key() {
        let mut backend = StubBackend::new();
        let mut session = Session::new();
        let mut status = StatusList::new();

        let req = Request::Config {
            key: "vcStubUsername".to_string(),
            values: vec!["alice".to_string()],
        };
        handle_config(&mut backend, req, &mut session, &mut status).unwrap();
        assert!(status.is_empty());

        let req = Request::Config {
            key: "vcStubNonsense".to_string(),
            values: vec!["x".to_string()],
        };
        let outcome = handle_config(&mut backend, req, &mut session, &mut status).unwrap();
        // Unknown keys warn but do not abort.
        assert!(outcome.success);
        assert!(!status.is_empty());
        assert!(!status.has_errors());
    }

    #[test]
    fn test_config_end_disconnects_backend() {
        let mut backend = connected_stub();
        let mut session = Session::new();
        let mut status = StatusList::new();
        let req = Request::Config {
            key: "end".to_string(),
            values: vec![],
        };
        handle_config(&mut backend, req, &mut session, &mut status).unwrap();
        assert!(!backend.is_connected());
    }

    #[test]
    fn test_login_connects() {
        let mut backend = StubBackend::new();
        let mut session = Session::new();
        let mut status = StatusList::new();
        let outcome =
            handle_login(&mut backend, Request::Empty, &mut session, &mut status).unwrap();
        assert!(outcome.success);
        assert!(backend.is_connected());
    }

    #[test]
    fn test_query_config_parameters_lists_unset_required() {
        let mut backend = StubBackend::new();
        backend.set_config_value("Username", "alice");
        let mut session = Session::new();
        let mut status = StatusList::new();
        let outcome = handle_query_config_parameters(
            &mut backend,
            Request::Empty,
            &mut session,
            &mut status,
        )
        .unwrap();
        let Response::FieldNames(names) = outcome.response else {
            panic!("wrong variant")
        };
        assert_eq!(names, vec!["Password"]);
    }

    #[test]
    fn test_custom_command_unknown_name_fails() {
        let mut backend = connected_stub();
        let mut session = Session::new();
        let mut status = StatusList::new();
        let outcome = handle_custom(
            &mut backend,
            Request::Custom {
                name: "nope".to_string(),
            },
            &mut session,
            &mut status,
        )
        .unwrap();
        assert!(!outcome.success);
        assert!(status.has_errors());
    }

    #[test]
    fn test_handler_rejects_wrong_variant() {
        let mut backend = connected_stub();
        let mut session = Session::new();
        let mut status = StatusList::new();
        assert!(matches!(
            handle_add(&mut backend, Request::Empty, &mut session, &mut status),
            Err(EngineError::Contract(_))
        ));
    }
}
