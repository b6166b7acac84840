use std::fs;
use std::path::PathBuf;
use std::process;

use anchora_core::{
    load_gltf_model, run_session, Engine, EngineSettings, ModelCatalog, Reticle,
};
use render::CaptureTarget;
use serde::Serialize;
use tracing::{info, warn};

use crate::logging;
use crate::plan::{self, PlanModel};
use crate::session::ScriptedSession;
use crate::source::DemoModelSource;

pub(crate) struct Args {
    pub plan_path: Option<PathBuf>,
    pub settings_path: Option<PathBuf>,
    pub print: bool,
    pub log_level: tracing::Level,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            plan_path: None,
            settings_path: None,
            print: false,
            log_level: tracing::Level::INFO,
        }
    }
}

pub(crate) fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut parsed = Args::default();
    let mut iter = args.iter().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--plan" => {
                let value = iter.next().ok_or_else(|| "--plan requires a path".to_string())?;
                parsed.plan_path = Some(PathBuf::from(value));
            }
            "--settings" => {
                let value = iter
                    .next()
                    .ok_or_else(|| "--settings requires a path".to_string())?;
                parsed.settings_path = Some(PathBuf::from(value));
            }
            "--print" => {
                parsed.print = true;
            }
            "--log-level" => {
                let value = iter
                    .next()
                    .ok_or_else(|| "--log-level requires a level".to_string())?;
                parsed.log_level = logging::parse_level(value)?;
            }
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            _ => {}
        }
    }

    Ok(parsed)
}

fn print_help() {
    println!(
        "Usage: anchora [options]\n  --plan <path>       session plan JSON (built-in demo otherwise)\n  --settings <path>   engine settings JSON override\n  --print             print the session report as JSON\n  --log-level <level> error|warn|info|debug|trace"
    );
}

#[derive(Debug, Serialize)]
pub(crate) struct SessionReport {
    pub frames: usize,
    pub render_passes: usize,
    pub placed_objects: usize,
    pub selected: Option<u64>,
    pub objects: Vec<ObjectReport>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ObjectReport {
    pub id: u64,
    pub position: [f32; 3],
    pub yaw: f32,
    pub scale: f32,
}

pub(crate) fn run(args: &Args) -> Result<SessionReport, String> {
    let plan = match &args.plan_path {
        Some(path) => plan::load_plan(path)?,
        None => plan::default_plan(),
    };
    let settings = match &args.settings_path {
        Some(path) => {
            let data = fs::read_to_string(path).map_err(|err| err.to_string())?;
            EngineSettings::from_json_str(&data)?
        }
        None => plan.settings.clone(),
    };

    let descriptors = plan.models.iter().map(PlanModel::to_descriptor).collect();
    let mut catalog = ModelCatalog::new(Box::new(DemoModelSource::new(descriptors)));
    if !catalog.entries().is_empty() {
        if let Err(err) = catalog.set_active(plan.active_model) {
            warn!(error = %err, "initial model load failed");
        }
    }

    let reticle = match &plan.reticle {
        Some(uri) => match load_gltf_model(uri) {
            Ok(model) => Reticle::new(model),
            Err(err) => {
                warn!(error = %err, "reticle load failed, using generated ring");
                Reticle::fallback()
            }
        },
        None => Reticle::fallback(),
    };

    let mut engine = Engine::new(settings, catalog, reticle);
    let mut session = ScriptedSession::new(plan.to_frames());
    let mut target = CaptureTarget::new();
    let frames = run_session(&mut engine, &mut session, &mut target);

    info!(frames, objects = engine.placed().len(), "session complete");

    Ok(SessionReport {
        frames,
        render_passes: target.passes().len(),
        placed_objects: engine.placed().len(),
        selected: engine.selection().selected().map(|id| id.0),
        objects: engine
            .placed()
            .iter()
            .map(|object| ObjectReport {
                id: object.id.0,
                position: object.transform.position.to_array(),
                yaw: object.transform.yaw,
                scale: object.transform.scale,
            })
            .collect(),
    })
}
