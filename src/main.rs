use anyhow::{bail, Context};
use clap::Parser;
use log::{info, warn};

use predict_form::{
    CompletionOrder, Constraints, ControllerConfig, Form, FormController, InputValidator,
    NumberInput, Step, SubmitEvent, INVALID_CLASS,
};

/// Fill the prediction form, submit it once and print every rendered state.
#[derive(Parser, Debug)]
#[command(name = "predict-form", version)]
struct Args {
    /// Prediction endpoint (overrides PREDICT_URL, HOST and PORT)
    #[arg(long)]
    endpoint: Option<String>,

    /// Field value as NAME=VALUE, repeatable
    #[arg(long = "field", value_parser = parse_field)]
    fields: Vec<(String, String)>,

    /// Build the form from --field alone instead of the house price preset
    #[arg(long)]
    custom: bool,

    /// "latest" or "last-to-resolve" (overrides COMPLETION_ORDER)
    #[arg(long)]
    order: Option<CompletionOrder>,
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected NAME=VALUE, got {raw:?}")),
    }
}

fn build_form(args: &Args) -> anyhow::Result<Form> {
    if args.custom {
        let mut form = Form::new();
        for (name, value) in &args.fields {
            form.push(
                NumberInput::new(name.clone(), Constraints::default().step(Step::Any))
                    .with_value(value.clone()),
            );
        }
        return Ok(form);
    }

    let mut form = Form::house_prices();
    for (name, value) in &args.fields {
        let Some(input) = form.input_mut(name) else {
            bail!("unknown field {name:?}, pass --custom to submit arbitrary fields");
        };
        input.set_value(value.clone());
    }
    Ok(form)
}

#[actix_rt::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .format_module_path(false)
        .init();

    let args = Args::parse();

    let mut config = ControllerConfig::from_env()?;
    if let Some(endpoint) = &args.endpoint {
        config.endpoint = endpoint.clone();
    }
    if let Some(order) = args.order {
        config.completion_order = order;
    }
    info!("🚀 Prediction endpoint: {}", config.endpoint);
    info!("Completion order: {}", config.completion_order);

    let mut form = build_form(&args).context("building form")?;
    InputValidator::new().attach(&mut form);
    for input in form.inputs() {
        if input.class_list.contains(INVALID_CLASS) {
            warn!("Field {} has an invalid value {:?}", input.name, input.value);
        }
    }

    let controller = FormController::from_config(&config);
    let submission = controller.on_submit(&mut SubmitEvent::new(), &form);
    println!("{}", controller.markup());

    submission.await;
    println!("{}", controller.markup());
    Ok(())
}
