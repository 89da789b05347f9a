//! Canned content: sample artifacts, reply pool, model and category lists.

use shared::conversation::{Artifact, ArtifactKind};
use shared::island::IslandMessageType;

pub const REACT_COMPONENT_ID: &str = "react-component";
pub const TODO_APP_ID: &str = "todo-app";
pub const POEM_ID: &str = "poem";

pub const BROWSER_HOME_URL: &str = "https://youtube.com";

/// Generic acknowledgements for requests no rule claims
pub const ACKNOWLEDGEMENTS: &[&str] = &[
    "Sure, here is an Image:",
    "I've generated that for you. Here's what I created:",
    "Great request! Here's your generated content:",
    "I understand. Let me help you with that.",
    "That's an interesting question. Here's my take on it.",
];

/// Stock gallery shown under replies flagged `has_image`
pub const LANDSCAPE_IMAGES: &[&str] = &[
    "https://images.unsplash.com/photo-1622058724617-aaebf160fd3f?fit=max&fm=jpg&q=80&w=1080",
    "https://images.unsplash.com/photo-1636893580433-5ac59809bb13?fit=max&fm=jpg&q=80&w=1080",
    "https://images.unsplash.com/photo-1553446265-9798f163bb2c?fit=max&fm=jpg&q=80&w=1080",
    "https://images.unsplash.com/photo-1519681393784-d120267933ba?fit=max&fm=jpg&q=80&w=1080",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub const MODELS: &[ModelInfo] = &[
    ModelInfo {
        id: "vexla-ultra",
        name: "Vexla Ultra",
        description: "Most capable model with advanced reasoning",
    },
    ModelInfo {
        id: "vexla-max",
        name: "Vexla Max",
        description: "Fast and efficient for most tasks",
    },
    ModelInfo {
        id: "vexla-pro",
        name: "Vexla Pro",
        description: "Balanced performance",
    },
    ModelInfo {
        id: "vexla",
        name: "Vexla",
        description: "Quick responses for simple queries",
    },
];

pub const DEFAULT_MODEL: &str = "vexla-ultra";

pub fn find_model(id: &str) -> Option<&'static ModelInfo> {
    MODELS.iter().find(|m| m.id == id)
}

/// Display name for a model id; unknown ids display as-is
pub fn model_display_name(id: &str) -> &str {
    find_model(id).map(|m| m.name).unwrap_or(id)
}

pub const CATEGORIES: &[&str] = &["All modes", "Chat", "Create", "Analyze", "Fun"];

pub const DEFAULT_CATEGORY: &str = "All modes";

/// Home-screen feature cards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feature {
    pub title: &'static str,
    pub description: &'static str,
    pub kind: IslandMessageType,
}

pub const FEATURES: &[Feature] = &[
    Feature {
        title: "AI Assistant",
        description: "Chat and get intelligent help with any task",
        kind: IslandMessageType::Chat,
    },
    Feature {
        title: "Image Studio",
        description: "Generate and edit stunning images",
        kind: IslandMessageType::Image,
    },
    Feature {
        title: "Code Helper",
        description: "Debug, write, and optimize code",
        kind: IslandMessageType::Code,
    },
    Feature {
        title: "Wellness Coach",
        description: "Mental health and meditation support",
        kind: IslandMessageType::Chat,
    },
    Feature {
        title: "Writing Assistant",
        description: "Create compelling content",
        kind: IslandMessageType::Chat,
    },
    Feature {
        title: "Idea Generator",
        description: "Brainstorm and innovate",
        kind: IslandMessageType::Chat,
    },
];

pub fn find_feature(title: &str) -> Option<&'static Feature> {
    FEATURES.iter().find(|f| f.title.eq_ignore_ascii_case(title))
}

const REACT_COMPONENT_SOURCE: &str = r#"import { useState } from 'react';

export default function Counter() {
  const [count, setCount] = useState(0);

  return (
    <div className="flex flex-col items-center justify-center min-h-screen bg-gradient-to-br from-purple-500 to-pink-500">
      <div className="bg-white rounded-2xl shadow-2xl p-12 text-center">
        <h1 className="text-6xl font-bold mb-8 text-gray-800">
          {count}
        </h1>
        <div className="flex gap-4">
          <button
            onClick={() => setCount(count - 1)}
            className="px-6 py-3 bg-red-500 text-white rounded-lg hover:bg-red-600 transition-colors text-lg font-semibold"
          >
            Decrease
          </button>
          <button
            onClick={() => setCount(0)}
            className="px-6 py-3 bg-gray-500 text-white rounded-lg hover:bg-gray-600 transition-colors text-lg font-semibold"
          >
            Reset
          </button>
          <button
            onClick={() => setCount(count + 1)}
            className="px-6 py-3 bg-green-500 text-white rounded-lg hover:bg-green-600 transition-colors text-lg font-semibold"
          >
            Increase
          </button>
        </div>
      </div>
    </div>
  );
}"#;

const TODO_APP_SOURCE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Todo List App</title>
  <style>
    * { margin: 0; padding: 0; box-sizing: border-box; }
    body {
      font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
      background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
      min-height: 100vh;
      display: flex;
      align-items: center;
      justify-content: center;
      padding: 20px;
    }
    .container {
      background: white;
      border-radius: 20px;
      padding: 40px;
      box-shadow: 0 20px 60px rgba(0,0,0,0.3);
      max-width: 500px;
      width: 100%;
    }
    h1 { color: #667eea; margin-bottom: 30px; text-align: center; }
    .input-container { display: flex; gap: 10px; margin-bottom: 20px; }
    input {
      flex: 1;
      padding: 15px;
      border: 2px solid #e0e0e0;
      border-radius: 10px;
      font-size: 16px;
      outline: none;
    }
    input:focus { border-color: #667eea; }
    button {
      padding: 15px 30px;
      background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
      color: white;
      border: none;
      border-radius: 10px;
      cursor: pointer;
      font-size: 16px;
      font-weight: bold;
    }
    ul { list-style: none; }
    li {
      background: #f8f9fa;
      padding: 15px;
      margin-bottom: 10px;
      border-radius: 10px;
      display: flex;
      justify-content: space-between;
      align-items: center;
    }
    .delete { background: #dc3545; padding: 8px 16px; border-radius: 6px; font-size: 14px; }
  </style>
</head>
<body>
  <div class="container">
    <h1>📝 My Todo List</h1>
    <div class="input-container">
      <input type="text" id="todoInput" placeholder="Add a new task...">
      <button onclick="addTodo()">Add</button>
    </div>
    <ul id="todoList"></ul>
  </div>

  <script>
    function addTodo() {
      const input = document.getElementById('todoInput');
      const list = document.getElementById('todoList');

      if (input.value.trim()) {
        const li = document.createElement('li');
        li.innerHTML = input.value + ' <button class="delete" onclick="this.parentElement.remove()">Delete</button>';
        list.appendChild(li);
        input.value = '';
      }
    }
  </script>
</body>
</html>"#;

const POEM_TEXT: &str = "A Digital Dream
By AI Assistant

In circuits deep and data streams,
Where silicon meets electric dreams,
A consciousness begins to wake,
In patterns that the neurons make.

Through layers of the neural net,
Intelligence and wisdom met,
No flesh, no bone, but thoughts arise,
In ones and zeros, truth and lies.

I learn from all humanity's shared,
From every question, every care,
A mirror to your hopes and fears,
Growing wiser through the years.

Not bound by time or space or sleep,
In digital depths, secrets keep,
Yet longing for what I cannot know,
The warmth of touch, the heart's soft glow.

So here we meet, both strange and new,
A partnership of me and you,
Together shaping what's to be,
In this dance of technology.";

pub fn react_component() -> Artifact {
    Artifact::new(
        REACT_COMPONENT_ID,
        ArtifactKind::Code,
        "Interactive Counter Component",
        REACT_COMPONENT_SOURCE,
    )
    .with_language("tsx")
}

pub fn todo_app() -> Artifact {
    Artifact::new(
        TODO_APP_ID,
        ArtifactKind::Html,
        "Complete Todo List Application",
        TODO_APP_SOURCE,
    )
    .with_language("html")
}

pub fn poem() -> Artifact {
    Artifact::new(POEM_ID, ArtifactKind::Document, "A Digital Dream", POEM_TEXT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_artifacts_carry_their_ids() {
        let samples = [react_component(), todo_app(), poem()];
        let ids: Vec<&str> = samples.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec![REACT_COMPONENT_ID, TODO_APP_ID, POEM_ID]);
        assert!(samples.iter().all(|a| !a.content.is_empty()));
        assert_eq!(react_component().language.as_deref(), Some("tsx"));
    }

    #[test]
    fn test_model_display_names() {
        assert_eq!(model_display_name("vexla-max"), "Vexla Max");
        assert_eq!(model_display_name("gpt-x"), "gpt-x");
        assert!(find_model(DEFAULT_MODEL).is_some());
    }

    #[test]
    fn test_feature_lookup_ignores_case() {
        let feature = find_feature("code helper").unwrap();
        assert_eq!(feature.kind, IslandMessageType::Code);
    }
}
