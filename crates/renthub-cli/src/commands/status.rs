// Session status command
//
// Shows the session record plus the guard decision each route class would
// get right now, which is exactly what the web shell computes per navigation.

use anyhow::Result;
use serde::Serialize;

use renthub_client::SessionHandle;
use renthub_core::{evaluate, RouteClass, RouteDecision, Session};

use crate::output::{print_field, OutputFormat};

#[derive(Serialize)]
struct StatusReport {
    session: Session,
    protected_routes: RouteDecision,
    guest_routes: RouteDecision,
}

fn describe(decision: RouteDecision) -> String {
    match decision {
        RouteDecision::Render => "render".to_string(),
        RouteDecision::Redirect(target) => format!("redirect -> {}", target.path()),
        RouteDecision::Loading => "loading".to_string(),
    }
}

pub async fn run(session: &SessionHandle, output: OutputFormat) -> Result<()> {
    let state = session.current();
    let report = StatusReport {
        protected_routes: evaluate(RouteClass::Protected, &state),
        guest_routes: evaluate(RouteClass::GuestOnly, &state),
        session: state,
    };

    if output.is_text() {
        let signed_in = match &report.session.user {
            Some(user) => format!("yes ({})", user.email),
            None => "no".to_string(),
        };
        print_field("Signed in", &signed_in);
        print_field(
            "Token",
            if report.session.token.is_some() {
                "present"
            } else {
                "absent"
            },
        );
        if let Some(error) = &report.session.error {
            print_field("Last error", error);
        }
        print_field("Protected", &describe(report.protected_routes));
        print_field("Guest-only", &describe(report.guest_routes));
    } else {
        output.print_value(&report);
    }
    Ok(())
}
