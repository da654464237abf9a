//! Pokemon Training MCP Server
//!
//! A Model Context Protocol server that exposes the training roster engine
//! over line-delimited JSON-RPC on stdin/stdout. Logs go to stderr.
//!
//! Usage: `pokemon-training-mcp <world.ron>`; set `POKEMON_TRAINING_CONFIG`
//! to a RON file to override the default training config.

use std::path::Path;

use pokemon_training::mcp_interface::RosterService;
use pokemon_training::{TrainingConfig, World};
use serde_json::{json, Value};
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const CONFIG_ENV: &str = "POKEMON_TRAINING_CONFIG";

struct McpServer {
    service: RosterService,
}

fn text(text: impl Into<String>) -> Value {
    json!({
        "content": [{"type": "text", "text": text.into()}]
    })
}

fn reply(result: Result<String, String>) -> Value {
    match result {
        Ok(output) => text(output),
        Err(e) => text(format!("Error: {}", e)),
    }
}

impl McpServer {
    fn new(service: RosterService) -> Self {
        Self { service }
    }

    async fn handle_request(&mut self, method: &str, params: &Value) -> Value {
        match method {
            "initialize" => {
                json!({
                    "capabilities": {
                        "tools": {}
                    },
                    "serverInfo": {
                        "name": "pokemon-training",
                        "version": env!("CARGO_PKG_VERSION")
                    }
                })
            }
            "tools/list" => {
                json!({
                    "tools": [
                        {
                            "name": "open_roster",
                            "description": "Open the roster of the trainer owning an actor (a trainer or one of its pokemon)",
                            "inputSchema": {
                                "type": "object",
                                "properties": {
                                    "actor": {
                                        "type": "string",
                                        "description": "Actor id of a trainer or pokemon"
                                    },
                                    "user": {
                                        "type": "string",
                                        "description": "Id of the user opening the roster"
                                    }
                                },
                                "required": ["actor"]
                            }
                        },
                        {
                            "name": "show_roster",
                            "description": "Show every collection of the open roster",
                            "inputSchema": {
                                "type": "object",
                                "properties": {}
                            }
                        },
                        {
                            "name": "move_member",
                            "description": "Drag a pokemon between collections (available, party, boxed, training or a custom group slug)",
                            "inputSchema": {
                                "type": "object",
                                "properties": {
                                    "member": {
                                        "type": "string",
                                        "description": "Actor id of the pokemon"
                                    },
                                    "from": {
                                        "type": "string",
                                        "description": "Collection it is dragged from; omit for a drop from outside the roster"
                                    },
                                    "to": {
                                        "type": "string",
                                        "description": "Destination collection; omit to use the party (or the box when the party is full)"
                                    },
                                    "index": {
                                        "type": "number",
                                        "description": "Position in the destination (0-based)"
                                    }
                                },
                                "required": ["member"]
                            }
                        },
                        {
                            "name": "plan_training",
                            "description": "Split this cycle's training experience across the selected pokemon",
                            "inputSchema": {
                                "type": "object",
                                "properties": {}
                            }
                        },
                        {
                            "name": "complete_training",
                            "description": "Apply training experience to the selected pokemon and report the outcome",
                            "inputSchema": {
                                "type": "object",
                                "properties": {
                                    "training": {
                                        "type": "string",
                                        "description": "agility-training, brutal-training, focused-training, inspired-training or none"
                                    },
                                    "amounts": {
                                        "type": "object",
                                        "description": "Optional manual amounts by pokemon id; the even split is used when omitted"
                                    }
                                }
                            }
                        }
                    ]
                })
            }
            "tools/call" => {
                let tool_name = params["name"].as_str().unwrap_or("");
                let args = &params["arguments"];
                self.handle_tool_call(tool_name, args).await
            }
            _ => {
                json!({
                    "error": {
                        "code": -32601,
                        "message": "Method not found"
                    }
                })
            }
        }
    }

    async fn handle_tool_call(&mut self, tool_name: &str, args: &Value) -> Value {
        debug!(tool = tool_name, "Tool call");
        match tool_name {
            "open_roster" => {
                let actor = args["actor"].as_str().unwrap_or("");
                let user = args["user"].as_str();
                reply(self.service.open_roster(actor, user).await)
            }
            "show_roster" => reply(self.service.show_roster().await),
            "move_member" => {
                let member = args["member"].as_str().unwrap_or("");
                let from = args["from"].as_str();
                let to = args["to"].as_str();
                let index = args["index"].as_u64().map(|i| i as usize);
                reply(self.service.move_member(member, from, to, index).await)
            }
            "plan_training" => reply(self.service.plan_training().await),
            "complete_training" => {
                let training = args["training"].as_str().unwrap_or("none");
                let amounts = args["amounts"].as_object().map(|amounts| {
                    amounts
                        .iter()
                        .map(|(id, value)| {
                            let value = match value {
                                Value::String(s) => s.clone(),
                                other => other.to_string(),
                            };
                            (id.clone(), value)
                        })
                        .collect()
                });
                reply(self.service.complete_training(training, amounts).await)
            }
            _ => text(format!("Unknown tool: {}", tool_name)),
        }
    }

    async fn run(&mut self) -> io::Result<()> {
        let mut lines = BufReader::new(io::stdin()).lines();
        let mut stdout = io::stdout();

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            // Parse the JSON-RPC request
            let request: Value = match serde_json::from_str(&line) {
                Ok(req) => req,
                Err(e) => {
                    warn!(error = %e, "Ignoring malformed request");
                    continue;
                }
            };

            let id = request["id"].clone();
            let method = request["method"].as_str().unwrap_or("");
            let params = &request["params"];

            let result = self.handle_request(method, params).await;

            let response = json!({
                "jsonrpc": "2.0",
                "id": id,
                "result": result
            });

            stdout.write_all(format!("{}\n", response).as_bytes()).await?;
            stdout.flush().await?;
        }

        Ok(())
    }
}

fn load_world() -> Result<World, String> {
    let path = std::env::args()
        .nth(1)
        .ok_or("usage: pokemon-training-mcp <world.ron>")?;
    let content = std::fs::read_to_string(&path).map_err(|e| format!("{}: {}", path, e))?;
    World::from_ron_str(&content).map_err(|e| format!("{}: {}", path, e))
}

fn load_config() -> Result<TrainingConfig, String> {
    match std::env::var(CONFIG_ENV) {
        Ok(path) => TrainingConfig::load(Path::new(&path)).map_err(|e| format!("{}: {}", path, e)),
        Err(_) => Ok(TrainingConfig::default()),
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let (world, config) = match (load_world(), load_config()) {
        (Ok(world), Ok(config)) => (world, config),
        (Err(e), _) | (_, Err(e)) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };
    info!(
        actors = world.actors.len(),
        instances = config.instance_count,
        "Starting MCP server"
    );

    let mut server = McpServer::new(RosterService::new(world, config));
    server.run().await
}
