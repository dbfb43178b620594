//! Default catalog used when no saved catalog exists.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::core::model::{AppState, Category, CategoryId, Tool, ToolId};

struct SeedTool {
    id: &'static str,
    name: &'static str,
    url: &'static str,
    kind: &'static str,
    summary: &'static str,
    tags: &'static [&'static str],
    category: &'static str,
    pinned: bool,
}

const CATEGORIES: &[(&str, &str, &[&str])] = &[
    ("cat_chatbots", "Chatbots & Assistants", &["tool_openai", "tool_clickup"]),
    (
        "cat_image",
        "Image & Creative",
        &["tool_google_labs", "tool_reimagine", "tool_simular"],
    ),
    ("cat_dev", "Development & Agents", &["tool_adeptly", "tool_punku"]),
];

const TOOLS: &[SeedTool] = &[
    SeedTool {
        id: "tool_openai",
        name: "OpenAI ChatGPT",
        url: "https://chat.openai.com",
        kind: "Chatbot",
        summary: "Advanced AI language model for conversation, coding, and content generation.",
        tags: &["LLM", "Productivity", "General"],
        category: "cat_chatbots",
        pinned: true,
    },
    SeedTool {
        id: "tool_google_labs",
        name: "Google Labs CC",
        url: "https://labs.google",
        kind: "Creative Suite",
        summary: "Experimental AI tools and features from Google.",
        tags: &["Experimental", "Google", "Creative"],
        category: "cat_image",
        pinned: false,
    },
    SeedTool {
        id: "tool_reimagine",
        name: "REimagineHome.ai",
        url: "https://reimaginehome.ai",
        kind: "Design Tool",
        summary: "AI-powered interior design and virtual staging platform.",
        tags: &["Real Estate", "Design", "3D"],
        category: "cat_image",
        pinned: false,
    },
    SeedTool {
        id: "tool_adeptly",
        name: "Adeptly",
        url: "https://adeptly.ai",
        kind: "Agent Platform",
        summary: "Build and deploy AI agents for various tasks.",
        tags: &["Agents", "Automation", "No-code"],
        category: "cat_dev",
        pinned: false,
    },
    SeedTool {
        id: "tool_punku",
        name: "PUNKU.ai",
        url: "https://punku.ai",
        kind: "Developer Tool",
        summary: "AI-powered development assistant.",
        tags: &["Coding", "Developer Experience"],
        category: "cat_dev",
        pinned: false,
    },
    SeedTool {
        id: "tool_simular",
        name: "Simular AI",
        url: "https://simular.ai",
        kind: "Simulation",
        summary: "AI platform for creating realistic simulations.",
        tags: &["Simulation", "Data", "Modeling"],
        category: "cat_image",
        pinned: false,
    },
    SeedTool {
        id: "tool_clickup",
        name: "ClickUp Chat",
        url: "https://clickup.com/features/chat",
        kind: "Productivity",
        summary: "AI-integrated chat within ClickUp for task management.",
        tags: &["Project Management", "Collaboration"],
        category: "cat_chatbots",
        pinned: true,
    },
];

/// The built-in catalog. Every tool gets `created_at`.
pub fn default_catalog(created_at: i64) -> AppState {
    let categories = CATEGORIES
        .iter()
        .map(|(id, name, tool_ids)| {
            Arc::new(Category {
                id: CategoryId::from(*id),
                name: name.to_string(),
                collapsed: false,
                tool_ids: tool_ids.iter().map(|t| ToolId::from(*t)).collect(),
            })
        })
        .collect();

    let tools: BTreeMap<ToolId, Arc<Tool>> = TOOLS
        .iter()
        .map(|seed| {
            let tool = Tool {
                id: ToolId::from(seed.id),
                name: seed.name.to_string(),
                url: seed.url.to_string(),
                kind: seed.kind.to_string(),
                summary: seed.summary.to_string(),
                tags: seed.tags.iter().map(|t| t.to_string()).collect(),
                category_id: CategoryId::from(seed.category),
                is_pinned: seed.pinned,
                created_at,
            };
            (tool.id.clone(), Arc::new(tool))
        })
        .collect();

    AppState {
        categories,
        tools,
        ..AppState::default()
    }
}
