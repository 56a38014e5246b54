//! Operator service — executes parsed operator commands.
//!
//! Every [`Command`] produces exactly one [`Reply`]. Text replies are meant to
//! be printed verbatim by the shell; [`Reply::Stop`] and [`Reply::Exit`] are
//! lifecycle requests the composition root acts upon.

use std::fmt::Write as _;

use motehub_domain::actuator::ActuatorCommand;
use motehub_domain::address::MoteAddress;
use motehub_domain::automation::Rule;
use motehub_domain::command::{Command, HELP};
use motehub_domain::error::MoteHubError;
use motehub_domain::mote::Mote;

use crate::context::ServerContext;
use crate::ports::ActuatorGateway;
use crate::services::automation_service::AutomationService;

/// Reply printed for any line the grammar rejects.
pub const INVALID_COMMAND: &str = "Invalid command, type 'help' for usage";

/// Outcome of one operator command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    /// Stop ingesting telemetry; the shell keeps running.
    Stop,
    /// Terminate the process.
    Exit,
}

impl Reply {
    fn text(message: impl Into<String>) -> Self {
        Self::Text(message.into())
    }
}

/// Application service behind the operator shell.
pub struct OperatorService<G> {
    ctx: ServerContext,
    automations: AutomationService,
    gateway: G,
}

impl<G: ActuatorGateway> OperatorService<G> {
    /// Create a new service over the shared context, sending through `gateway`.
    pub fn new(ctx: ServerContext, gateway: G) -> Self {
        let automations = AutomationService::new(&ctx);
        Self {
            ctx,
            automations,
            gateway,
        }
    }

    /// Execute one command and build its reply.
    #[tracing::instrument(skip(self))]
    pub async fn execute(&self, command: Command) -> Reply {
        match command {
            Command::Help => Reply::text(HELP),
            Command::Verbose { enabled } => {
                self.ctx.set_verbose(enabled);
                Reply::text(if enabled { "verbose on" } else { "verbose off" })
            }
            Command::Stop => Reply::Stop,
            Command::Exit => Reply::Exit,
            Command::ShowMotes => Reply::Text(self.show_motes()),
            Command::ShowAutomations => Reply::Text(self.show_automations()),
            Command::Led {
                address,
                color,
                state,
            } => {
                self.send(ActuatorCommand::Led {
                    address,
                    color,
                    state,
                })
                .await
            }
            Command::Valve { address, state } => {
                self.send(ActuatorCommand::Valve { address, state }).await
            }
            Command::Automate {
                source,
                destination,
                rule,
            } => self.automate(source, destination, rule),
            Command::RemoveAutomation { id } => match self.automations.remove_automation(&id) {
                Ok(removed) => Reply::Text(format!("automation {removed} removed")),
                Err(MoteHubError::NotFound(err)) => Reply::Text(err.to_string()),
                Err(MoteHubError::Validation(err)) => Reply::Text(err.to_string()),
                Err(err) => Reply::Text(format!("failed to remove automation {id}: {err}")),
            },
            Command::Invalid => Reply::text(INVALID_COMMAND),
        }
    }

    async fn send(&self, command: ActuatorCommand) -> Reply {
        match self.gateway.send(command).await {
            Ok(()) => Reply::Text(format!("sent {command}")),
            Err(err) => {
                tracing::warn!(%command, error = %err, "failed to send operator command");
                Reply::Text(format!("failed to send {command}: {err}"))
            }
        }
    }

    fn automate(&self, source: MoteAddress, destination: MoteAddress, rule: Rule) -> Reply {
        let automation = self
            .automations
            .create_automation(source, destination, rule);
        Reply::Text(format!("automation {} created", automation.id))
    }

    fn show_motes(&self) -> String {
        let mut motes = self.ctx.registry().all();
        if motes.is_empty() {
            return "no motes".to_owned();
        }
        motes.sort_by_key(|mote| mote.address);

        let mut out = String::new();
        for (index, mote) in motes.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            write_mote(&mut out, mote);
        }
        out
    }

    fn show_automations(&self) -> String {
        let automations = self.automations.list_automations();
        if automations.is_empty() {
            return "no automations".to_owned();
        }
        automations
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn write_mote(out: &mut String, mote: &Mote) {
    let _ = write!(out, "{} {}", mote.address, mote.kind);
    if let Some(value) = mote.last_value {
        let history: Vec<String> = mote.history.iter().map(u64::to_string).collect();
        let _ = write!(out, " value={value} history=[{}]", history.join(", "));
    }
    let _ = write!(out, " last_seen={}", mote.last_seen.format("%Y-%m-%d %H:%M:%S"));
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use motehub_domain::actuator::{LedColor, SwitchState};
    use motehub_domain::mote::MoteKind;
    use motehub_domain::telemetry::Telemetry;
    use motehub_domain::time::now;

    #[derive(Default)]
    struct SpyGateway {
        sent: Mutex<Vec<ActuatorCommand>>,
        fail: bool,
    }

    impl ActuatorGateway for SpyGateway {
        async fn send(&self, command: ActuatorCommand) -> Result<(), MoteHubError> {
            self.sent.lock().unwrap().push(command);
            if self.fail {
                Err(MoteHubError::Transport("no route to host".into()))
            } else {
                Ok(())
            }
        }
    }

    fn addr(last: u16) -> MoteAddress {
        MoteAddress::new(std::net::Ipv6Addr::new(0xbbbb, 0, 0, 0, 0xc30c, 0, 0, last))
    }

    fn make_service() -> (ServerContext, Arc<SpyGateway>, OperatorService<Arc<SpyGateway>>) {
        let ctx = ServerContext::new();
        let gateway = Arc::new(SpyGateway::default());
        let service = OperatorService::new(ctx.clone(), Arc::clone(&gateway));
        (ctx, gateway, service)
    }

    async fn run(service: &OperatorService<Arc<SpyGateway>>, line: &str) -> Reply {
        service.execute(Command::parse(line)).await
    }

    fn text(reply: Reply) -> String {
        match reply {
            Reply::Text(text) => text,
            other => panic!("expected text reply, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn should_print_help() {
        let (_, _, service) = make_service();
        assert_eq!(run(&service, "help").await, Reply::Text(HELP.to_owned()));
    }

    #[tokio::test]
    async fn should_reply_invalid_when_line_unknown() {
        let (_, _, service) = make_service();
        assert_eq!(
            run(&service, "launch rockets").await,
            Reply::Text(INVALID_COMMAND.to_owned())
        );
    }

    #[tokio::test]
    async fn should_toggle_verbose_flag() {
        let (ctx, _, service) = make_service();

        assert_eq!(text(run(&service, "verbose/on").await), "verbose on");
        assert!(ctx.is_verbose());
        assert_eq!(text(run(&service, "verbose/off").await), "verbose off");
        assert!(!ctx.is_verbose());
    }

    #[tokio::test]
    async fn should_return_lifecycle_replies() {
        let (_, _, service) = make_service();
        assert_eq!(run(&service, "stop").await, Reply::Stop);
        assert_eq!(run(&service, "exit").await, Reply::Exit);
    }

    #[tokio::test]
    async fn should_send_led_command_without_registry_gate() {
        let (_, gateway, service) = make_service();

        let reply = text(run(&service, "led/bbbb::c30c:0:0:2/green/on").await);

        assert!(reply.starts_with("sent led"));
        assert_eq!(
            *gateway.sent.lock().unwrap(),
            vec![ActuatorCommand::Led {
                address: addr(2),
                color: LedColor::Green,
                state: SwitchState::On,
            }]
        );
    }

    #[tokio::test]
    async fn should_report_send_failure() {
        let ctx = ServerContext::new();
        let gateway = Arc::new(SpyGateway {
            fail: true,
            ..SpyGateway::default()
        });
        let service = OperatorService::new(ctx, Arc::clone(&gateway));

        let reply = text(service.execute(Command::parse("valve/bbbb::c30c:0:0:4/off")).await);

        assert!(reply.starts_with("failed to send valve"));
        assert_eq!(gateway.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn should_create_list_and_remove_automation() {
        let (ctx, _, service) = make_service();

        let created = text(
            run(
                &service,
                "automate sensor_temperature/bbbb::c30c:0:0:1/valve/bbbb::c30c:0:0:4/40",
            )
            .await,
        );
        assert!(created.starts_with("automation "));
        assert_eq!(ctx.automations().len(), 1);

        let id = ctx.automations().all()[0].id.to_string();
        let listed = text(run(&service, "show automations").await);
        assert!(listed.contains(&id));
        assert!(listed.contains("temperature <= 40 -> valve on"));

        let removed = text(run(&service, &format!("remove automation/{id}")).await);
        assert_eq!(removed, format!("automation {id} removed"));
        assert!(ctx.automations().is_empty());

        let again = text(run(&service, &format!("remove automation/{id}")).await);
        assert_eq!(again, format!("automation {id} not found"));
    }

    #[tokio::test]
    async fn should_report_not_found_for_unknown_automation() {
        let (_, _, service) = make_service();
        assert_eq!(
            text(run(&service, "remove automation/nope").await),
            "automation nope not found"
        );
    }

    #[tokio::test]
    async fn should_show_empty_tables() {
        let (_, _, service) = make_service();
        assert_eq!(text(run(&service, "show motes").await), "no motes");
        assert_eq!(text(run(&service, "show automations").await), "no automations");
    }

    #[tokio::test]
    async fn should_show_motes_sorted_with_history() {
        let (ctx, _, service) = make_service();
        let t0 = now();
        ctx.registry().upsert(
            addr(3),
            &Telemetry::KeepAlive {
                kind: MoteKind::LedActuator,
            },
            t0,
        );
        for value in [20, 21] {
            ctx.registry().upsert(
                addr(1),
                &Telemetry::Reading {
                    kind: MoteKind::TemperatureSensor,
                    value,
                },
                t0,
            );
        }

        let shown = text(run(&service, "show motes").await);
        let lines: Vec<&str> = shown.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("bbbb::c30c:0:0:1 temperature sensor value=21 history=[20, 21]"));
        assert!(lines[1].starts_with("bbbb::c30c:0:0:3 led last_seen="));
    }
}
