//! `codesign` command line: drives the engine against a running backend.

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use uuid::Uuid;

use crate::auth::AuthSession;
use crate::client::StudioClient;
use crate::config::{config_path, StudioConfig};
use crate::engine::{Advance, Capabilities, Gateways, WorkflowEngine};
use crate::ids::ItemId;
use crate::models::*;
use crate::registry::SessionRegistry;
use crate::render::{render_overview, render_problem_tree};
use crate::sync::HttpGateway;
use crate::tools::{LoadOutcome, PersistOutcome, ToolStore};

#[derive(Parser)]
#[command(name = "codesign")]
#[command(about = "Run co-design sessions from the terminal")]
pub struct Cli {
    /// API base URL (overrides config and CODESIGN_URL)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Bearer token (overrides config and CODESIGN_TOKEN)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Save the resolved URL, token and timeout as the defaults
    Config,
    /// List projects
    Projects,
    /// Create a project (facilitators only)
    ProjectCreate {
        #[arg(short, long)]
        name: String,
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Delete a project and its sessions (facilitators only)
    ProjectDelete { id: Uuid },
    /// List sessions, optionally of one project
    Sessions {
        #[arg(short, long)]
        project: Option<Uuid>,
    },
    /// Create a session in a project
    SessionCreate {
        #[arg(short, long)]
        project: Uuid,
        #[arg(short, long)]
        name: String,
        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Show a session's steps and progress
    Session { id: Uuid },
    /// Print a tool's document
    Tool {
        session: Uuid,
        #[arg(value_parser = parse_tool)]
        tool: ToolKind,
    },
    /// Add an item to a tool and save
    Add {
        session: Uuid,
        #[arg(value_parser = parse_tool)]
        tool: ToolKind,
        text: String,
        /// Item kind: expectation kind, cause/effect, quadrant, lane or
        /// feedback kind, depending on the tool
        #[arg(short, long)]
        kind: Option<String>,
        /// Expectation priority, 1 (high) to 3 (low)
        #[arg(short, long, default_value = "2")]
        priority: u8,
        /// Idea category
        #[arg(short, long)]
        category: Option<String>,
        /// Idea color: a palette name or a hex value
        #[arg(long)]
        color: Option<String>,
    },
    /// Vote for an idea and save
    Vote { session: Uuid, idea: String },
    /// Save a tool and move the session past its step
    Next {
        session: Uuid,
        #[arg(value_parser = parse_tool)]
        tool: ToolKind,
    },
}

fn parse_tool(s: &str) -> Result<ToolKind, String> {
    ToolKind::from_path(s).ok_or_else(|| {
        let paths: Vec<&str> = ToolKind::ALL.iter().map(|t| t.path()).collect();
        format!("unknown tool '{}', expected one of: {}", s, paths.join(", "))
    })
}

/// Everything a command needs: the signed-in user and both gateways.
struct Connection {
    auth: AuthSession,
    gateways: Gateways,
}

impl Connection {
    async fn connect(config: &StudioConfig) -> Result<Self> {
        let client = StudioClient::from_config(config).context("Failed to build HTTP client")?;
        let user = client
            .current_user()
            .await
            .context("Could not resolve the current user; check the token")?;
        let auth = AuthSession::new(user, config.token.clone());
        let gateway = Arc::new(HttpGateway::new(client));
        Ok(Self {
            auth,
            gateways: Gateways::shared(gateway),
        })
    }

    fn registry(&self) -> SessionRegistry {
        SessionRegistry::new(Arc::clone(&self.gateways.sessions))
    }

    async fn engine(&self, session_id: Uuid) -> Result<WorkflowEngine> {
        let engine = WorkflowEngine::open(
            self.gateways.clone(),
            self.auth.clone(),
            session_id,
            Capabilities::default(),
        )
        .await?;
        Ok(engine)
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    let config = StudioConfig::load().with_overrides(cli.url, cli.token, cli.timeout);
    let command = match cli.command {
        Commands::Config => {
            let path = config_path()?;
            save_config(&config, &path)?;
            println!("{}", path.display());
            return Ok(());
        }
        command => command,
    };
    let conn = Connection::connect(&config).await?;

    match command {
        // Saved before connecting.
        Commands::Config => {}
        Commands::Projects => {
            for project in conn.registry().list_projects().await? {
                println!("{}  {}", project.id, project.name);
            }
        }
        Commands::ProjectCreate { name, description } => {
            let project = conn
                .registry()
                .create_project(&conn.auth, &name, &description)
                .await?;
            println!("{}", project.id);
        }
        Commands::ProjectDelete { id } => {
            conn.registry().delete_project(&conn.auth, id).await?;
        }
        Commands::Sessions { project } => {
            for session in conn.registry().list_sessions(project).await? {
                println!(
                    "{}  {}  (step {}/{})",
                    session.id,
                    session.name,
                    session.current_step + 1,
                    crate::steps::STEP_COUNT
                );
            }
        }
        Commands::SessionCreate {
            project,
            name,
            description,
        } => {
            let session = conn
                .registry()
                .create_session(project, &name, &description)
                .await?;
            println!("{}", session.id);
        }
        Commands::Session { id } => {
            let engine = conn.engine(id).await?;
            let session = engine.session();
            println!("{}", session.name);
            print!("{}", render_overview(&engine.overview()));
            println!("{:.0}% complete", engine.progress() * 100.0);
        }
        Commands::Tool { session, tool } => {
            let engine = conn.engine(session).await?;
            print_tool(&engine, tool).await?;
        }
        Commands::Add {
            session,
            tool,
            text,
            kind,
            priority,
            category,
            color,
        } => {
            let engine = conn.engine(session).await?;
            let item = ItemArgs {
                text,
                kind,
                priority,
                category,
                color,
            };
            println!("{}", add_item(&engine, tool, item).await?);
        }
        Commands::Vote { session, idea } => {
            let engine = conn.engine(session).await?;
            let votes = vote_idea(&engine, &idea).await?;
            println!("{} votes", votes);
        }
        Commands::Next { session, tool } => {
            let engine = conn.engine(session).await?;
            let advance = next_step(&engine, tool).await?;
            let step = advance.write.step();
            if !advance.write.acknowledged().await {
                tracing::warn!("server did not record step {}", step + 1);
            }
            match advance.next {
                Some(next) => println!("next: {} ({})", next.name, next.path),
                None => println!("session finished"),
            }
        }
    }

    Ok(())
}

fn save_config(config: &StudioConfig, path: &Path) -> Result<()> {
    config
        .save_to(path)
        .with_context(|| format!("Could not save config to {}", path.display()))
}

struct ItemArgs {
    text: String,
    kind: Option<String>,
    priority: u8,
    category: Option<String>,
    color: Option<String>,
}

impl ItemArgs {
    fn kind<T>(&self, parse: impl Fn(&str) -> Option<T>, default: T) -> Result<T> {
        match &self.kind {
            Some(raw) => parse(raw.as_str()).with_context(|| format!("Unknown kind '{}'", raw)),
            None => Ok(default),
        }
    }
}

/// Add one item and save; returns the new item's id.
async fn add_item(engine: &WorkflowEngine, tool: ToolKind, args: ItemArgs) -> Result<String> {
    let added = match tool {
        ToolKind::Expectations => {
            let store = loaded(engine.expectations().await)?;
            let kind = args.kind(ExpectationKind::from_str, ExpectationKind::Goal)?;
            let priority = Priority::try_from(args.priority).map_err(anyhow::Error::msg)?;
            let id = store.add_item(&args.text, kind, priority);
            save_added(&store, id.map(|id| id.to_string())).await?
        }
        ToolKind::ProblemTree => {
            let store = loaded(engine.problem_tree().await)?;
            let kind = args.kind(TreeNodeKind::from_str, TreeNodeKind::Cause)?;
            let id = store.add_node(&args.text, kind);
            save_added(&store, id.map(|id| id.to_string())).await?
        }
        ToolKind::EmpathyMap => {
            let store = loaded(engine.empathy_map().await)?;
            let quadrant = args.kind(Quadrant::from_str, Quadrant::Says)?;
            let index = store.add_entry(quadrant, &args.text);
            save_added(&store, index.map(|i| format!("{}[{}]", quadrant.as_str(), i))).await?
        }
        ToolKind::StoryMap => {
            let store = loaded(engine.story_map().await)?;
            let kind = args.kind(StoryKind::from_str, StoryKind::Activity)?;
            let id = store.add_item(&args.text, kind);
            save_added(&store, id.map(|id| id.to_string())).await?
        }
        ToolKind::IdeasBoard => {
            let store = loaded(engine.ideas_board().await)?;
            let category = match &args.category {
                Some(raw) => IdeaCategory::from_str(raw)
                    .with_context(|| format!("Unknown category '{}'", raw))?,
                None => IdeaCategory::General,
            };
            let color = resolve_color(args.color.as_deref());
            let id = store.add_idea(&args.text, category, &color);
            save_added(&store, id.map(|id| id.to_string())).await?
        }
        ToolKind::Feedback => {
            let store = loaded(engine.feedback().await)?;
            let kind = args.kind(FeedbackKind::from_str, FeedbackKind::Like)?;
            let id = store.add_item(&args.text, kind);
            save_added(&store, id.map(|id| id.to_string())).await?
        }
    };
    Ok(added)
}

async fn vote_idea(engine: &WorkflowEngine, idea: &str) -> Result<u32> {
    let store = loaded(engine.ideas_board().await)?;
    let votes = store
        .vote(&ItemId::from(idea))
        .with_context(|| format!("No idea with id {}", idea))?;
    save(&store).await?;
    Ok(votes)
}

async fn next_step(engine: &WorkflowEngine, tool: ToolKind) -> Result<Advance> {
    let advance = match tool {
        ToolKind::Expectations => engine.advance(&loaded(engine.expectations().await)?).await,
        ToolKind::ProblemTree => engine.advance(&loaded(engine.problem_tree().await)?).await,
        ToolKind::EmpathyMap => engine.advance(&loaded(engine.empathy_map().await)?).await,
        ToolKind::StoryMap => engine.advance(&loaded(engine.story_map().await)?).await,
        ToolKind::IdeasBoard => engine.advance(&loaded(engine.ideas_board().await)?).await,
        ToolKind::Feedback => engine.finish(&loaded(engine.feedback().await)?).await,
    };
    Ok(advance)
}

/// A store whose fetch failed holds the empty default; saving it would
/// replace whatever the server has.
fn loaded<D: ToolDocument>(store: ToolStore<D>) -> Result<ToolStore<D>> {
    if store.last_load() == Some(LoadOutcome::Failed) {
        bail!("Could not load {}; refusing to overwrite it", D::KIND);
    }
    Ok(store)
}

/// A palette name (`pink`) or a literal color; defaults to the first swatch.
fn resolve_color(raw: Option<&str>) -> String {
    match raw {
        None => IDEA_COLORS[0].1.to_string(),
        Some(raw) => IDEA_COLORS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(raw))
            .map_or_else(|| raw.to_string(), |(_, hex)| hex.to_string()),
    }
}

async fn save_added<D: ToolDocument>(store: &ToolStore<D>, added: Option<String>) -> Result<String> {
    let Some(added) = added else {
        bail!("Nothing to add: text is empty");
    };
    save(store).await?;
    Ok(added)
}

async fn save<D: ToolDocument>(store: &ToolStore<D>) -> Result<()> {
    match store.persist().await {
        PersistOutcome::Saved => Ok(()),
        PersistOutcome::Failed => bail!("Could not save {}", D::KIND),
    }
}

async fn print_tool(engine: &WorkflowEngine, tool: ToolKind) -> Result<()> {
    let output = match tool {
        ToolKind::Expectations => to_json(&engine.expectations().await)?,
        ToolKind::ProblemTree => render_problem_tree(&engine.problem_tree().await.snapshot()),
        ToolKind::EmpathyMap => to_json(&engine.empathy_map().await)?,
        ToolKind::StoryMap => to_json(&engine.story_map().await)?,
        ToolKind::IdeasBoard => to_json(&engine.ideas_board().await)?,
        ToolKind::Feedback => to_json(&engine.feedback().await)?,
    };
    println!("{}", output.trim_end());
    Ok(())
}

fn to_json<D: ToolDocument>(store: &ToolStore<D>) -> Result<String> {
    serde_json::to_string_pretty(&store.snapshot()).context("Failed to serialize document")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{CurrentUser, Role};
    use crate::sync::{MemoryGateway, SessionGateway};
    use serde_json::json;

    async fn engine_with_ideas() -> (Arc<MemoryGateway>, WorkflowEngine) {
        let gateway = Arc::new(MemoryGateway::new());
        let project = gateway
            .create_project(CreateProjectInput {
                name: "Checkout".to_string(),
                description: String::new(),
            })
            .await
            .expect("project");
        let session = gateway
            .create_session(CreateSessionInput {
                project_id: project.id,
                name: "Kickoff".to_string(),
                description: String::new(),
            })
            .await
            .expect("session call")
            .expect("session created");
        gateway.insert_document(
            ToolKind::IdeasBoard,
            session.id,
            json!({"ideas": [
                {"id": "a", "text": "Guest checkout", "category": "general", "votes": 1},
                {"id": "b", "text": "Saved carts", "category": "general"}
            ]}),
        );
        let user = CurrentUser {
            id: Uuid::new_v4(),
            name: "Dana".to_string(),
            email: String::new(),
            role: Role::CoDesigner,
        };
        let engine = WorkflowEngine::open(
            Gateways::shared(gateway.clone()),
            AuthSession::new(user, None),
            session.id,
            Capabilities::default(),
        )
        .await
        .expect("session opens");
        (gateway, engine)
    }

    fn idea(text: &str) -> ItemArgs {
        ItemArgs {
            text: text.to_string(),
            kind: None,
            priority: 2,
            category: None,
            color: None,
        }
    }

    fn stored_ideas(gateway: &MemoryGateway, engine: &WorkflowEngine) -> usize {
        gateway
            .document(ToolKind::IdeasBoard, engine.session().id)
            .and_then(|doc| doc["ideas"].as_array().map(Vec::len))
            .unwrap_or(0)
    }

    #[test]
    fn config_command_saves_flag_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = StudioConfig::default().with_overrides(
            Some("https://studio.example.org/api".to_string()),
            Some("abc".to_string()),
            None,
        );

        save_config(&config, &path).unwrap();

        let saved = StudioConfig::load_from(&path).unwrap();
        assert_eq!(saved.base_url, "https://studio.example.org/api");
        assert_eq!(saved.token.as_deref(), Some("abc"));
        assert_eq!(saved.timeout_secs, StudioConfig::default().timeout_secs);
    }

    #[tokio::test]
    async fn add_after_failed_fetch_keeps_the_server_document() {
        let (gateway, engine) = engine_with_ideas().await;
        gateway.fail_fetches(true);

        let result = add_item(&engine, ToolKind::IdeasBoard, idea("New idea")).await;

        assert!(result.is_err());
        assert_eq!(stored_ideas(&gateway, &engine), 2);
        assert_eq!(gateway.save_count(ToolKind::IdeasBoard, engine.session().id), 0);
    }

    #[tokio::test]
    async fn add_after_a_good_fetch_appends() {
        let (gateway, engine) = engine_with_ideas().await;

        let added = add_item(&engine, ToolKind::IdeasBoard, idea("New idea")).await;

        assert!(added.is_ok());
        assert_eq!(stored_ideas(&gateway, &engine), 3);
    }

    #[tokio::test]
    async fn vote_after_failed_fetch_is_refused() {
        let (gateway, engine) = engine_with_ideas().await;
        gateway.fail_fetches(true);

        let result = vote_idea(&engine, "a").await;

        assert!(result.is_err());
        assert_eq!(stored_ideas(&gateway, &engine), 2);
    }

    #[tokio::test]
    async fn next_after_failed_fetch_neither_saves_nor_moves_on() {
        let (gateway, engine) = engine_with_ideas().await;
        gateway.fail_fetches(true);

        let result = next_step(&engine, ToolKind::IdeasBoard).await;

        assert!(result.is_err());
        assert_eq!(stored_ideas(&gateway, &engine), 2);
        let session = gateway
            .get_session(engine.session().id)
            .await
            .expect("lookup")
            .expect("session");
        assert_eq!(session.current_step, 0);
    }
}
