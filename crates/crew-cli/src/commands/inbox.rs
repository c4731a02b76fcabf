use crate::util::{teams_root, time::format_age_iso8601};
use anyhow::Result;
use clap::Args;
use crew_lead::Mailbox;

#[derive(Args)]
pub struct InboxArgs {
    /// Team name.
    team: String,

    /// Agent name (use "team-lead" for the lead's own inbox).
    agent: String,

    /// Only show unread messages.
    #[arg(long)]
    unread: bool,

    /// Emit JSON instead of a text listing.
    #[arg(long)]
    json: bool,
}

pub fn run(args: InboxArgs) -> Result<()> {
    let mailbox = Mailbox::new(teams_root()?);
    let messages = mailbox.read(&args.team, &args.agent, args.unread)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&messages)?);
        return Ok(());
    }

    if messages.is_empty() {
        println!("(no {}messages)", if args.unread { "unread " } else { "" });
        return Ok(());
    }

    for message in &messages {
        let mark = if message.read { " " } else { "*" };
        let summary = message.summary.as_deref().unwrap_or("-");
        println!("{mark} [{}] {} -> {} ({summary})", format_age_iso8601(&message.timestamp), message.from, args.agent);
        println!("    {}", message.text);
    }
    Ok(())
}
