//! Built-in diagrams.
//!
//! Each [`DiagramKind`] is a literal table of boxes and connectors turned into
//! a [`Diagram`]. Colors are taken from the standard
//! [`Palette`](trellis_core::color::Palette) by role name.
//!
//! # Example
//!
//! ```
//! # use trellis::catalog::DiagramKind;
//! let kind: DiagramKind = "data-flow".parse().unwrap();
//! let diagram = kind.build().unwrap();
//! assert_eq!((diagram.width(), diagram.height()), (1400, 600));
//! assert_eq!(kind.file_stem(), "data_flow");
//! ```

use std::{fmt, str::FromStr};

use trellis_core::{
    color::{Color, Palette},
    draw::{Anchor, ConnectorStyle, Edge, Node, ShapeKind, StrokeDefinition},
    geometry::{Point, Size},
};

use crate::{Decoration, Diagram, TrellisError};

/// The diagrams shipped with Trellis, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagramKind {
    SystemArchitecture,
    UseCase,
    DataFlow,
    ComponentTree,
    FlowChart,
}

impl DiagramKind {
    /// Every catalog entry, in rendering order.
    pub const ALL: [DiagramKind; 5] = [
        Self::SystemArchitecture,
        Self::UseCase,
        Self::DataFlow,
        Self::ComponentTree,
        Self::FlowChart,
    ];

    /// Short name used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Self::SystemArchitecture => "architecture",
            Self::UseCase => "use-case",
            Self::DataFlow => "data-flow",
            Self::ComponentTree => "component-tree",
            Self::FlowChart => "flow-chart",
        }
    }

    /// Output file name without extension.
    pub fn file_stem(self) -> &'static str {
        match self {
            Self::SystemArchitecture => "system_architecture",
            Self::UseCase => "use_case",
            Self::DataFlow => "data_flow",
            Self::ComponentTree => "component_architecture",
            Self::FlowChart => "auth_flow",
        }
    }

    /// Title drawn at the top of the diagram.
    pub fn title(self) -> &'static str {
        match self {
            Self::SystemArchitecture => "NIVI AI - System Architecture",
            Self::UseCase => "NIVI AI - Use Case Diagram",
            Self::DataFlow => "NIVI AI - Data Flow Diagram",
            Self::ComponentTree => "NIVI AI - Component Architecture",
            Self::FlowChart => "NIVI AI - Authentication Flow",
        }
    }

    /// Builds the diagram description for this entry.
    ///
    /// # Errors
    ///
    /// Fails only if a table entry is malformed, which the catalog tests rule out.
    pub fn build(self) -> Result<Diagram, TrellisError> {
        match self {
            Self::SystemArchitecture => system_architecture(),
            Self::UseCase => use_case(),
            Self::DataFlow => data_flow(),
            Self::ComponentTree => component_tree(),
            Self::FlowChart => flow_chart(),
        }
    }
}

impl fmt::Display for DiagramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DiagramKind {
    type Err = TrellisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s || kind.file_stem() == s)
            .ok_or_else(|| TrellisError::UnknownDiagram(s.to_string()))
    }
}

fn color(name: &str) -> Result<Color, TrellisError> {
    Ok(Palette::standard().color(name)?)
}

fn arrow(from: (f32, f32), to: (f32, f32), stroke: &StrokeDefinition, label: &str) -> Edge {
    let edge = Edge::new(Point::new(from.0, from.1), Point::new(to.0, to.1))
        .with_stroke(stroke.clone());
    if label.is_empty() {
        edge
    } else {
        edge.with_label(label)
    }
}

fn system_architecture() -> Result<Diagram, TrellisError> {
    const BOXES: [(f32, f32, f32, f32, &str); 6] = [
        (
            100.0,
            150.0,
            300.0,
            100.0,
            "Frontend Layer\n(React.js)\n- Components\n- State Management\n- Routing",
        ),
        (500.0, 150.0, 300.0, 100.0, "User Interface\n- Chat Display\n- Input Area\n- Sidebar"),
        (900.0, 150.0, 250.0, 100.0, "Visual Elements\n- Animations\n- Icons\n- Themes"),
        (300.0, 320.0, 300.0, 100.0, "API Layer\n(RESTful)\n- Authentication\n- Chat Management"),
        (700.0, 320.0, 300.0, 100.0, "Storage Layer\n- LocalStorage\n- MongoDB"),
        (
            400.0,
            490.0,
            400.0,
            100.0,
            "AI Service Layer\n- Natural Language Processing\n- Response Generation",
        ),
    ];
    const ARROWS: [((f32, f32), (f32, f32)); 5] = [
        ((450.0, 200.0), (500.0, 200.0)),
        ((800.0, 200.0), (900.0, 200.0)),
        ((450.0, 250.0), (450.0, 320.0)),
        ((650.0, 370.0), (700.0, 370.0)),
        ((600.0, 420.0), (600.0, 490.0)),
    ];

    let kind = DiagramKind::SystemArchitecture;
    let fill = color("box")?;
    let text = color("box-text")?;
    let border = StrokeDefinition::solid(color("ink")?, 3.0);
    let stroke = StrokeDefinition::solid(color("arrow")?, 3.0);

    let nodes = BOXES
        .iter()
        .map(|&(x, y, w, h, label)| -> Result<Node, TrellisError> {
            Ok(Node::new(
                ShapeKind::Rectangle,
                Anchor::TopLeft,
                Point::new(x, y),
                Size::new(w, h),
            )?
            .with_label(label)
            .with_fill(fill)
            .with_border(border.clone())
            .with_label_color(text))
        })
        .collect::<Result<Vec<_>, TrellisError>>()?;

    Diagram::builder(kind.title(), 1200, 800)
        .with_nodes(nodes)
        .with_edges(ARROWS.iter().map(|&(from, to)| arrow(from, to, &stroke, "")))
        .build()
}

fn use_case() -> Result<Diagram, TrellisError> {
    const USE_CASES: [(f32, f32, &str); 10] = [
        (400.0, 150.0, "Login/Register"),
        (400.0, 250.0, "Start New Chat"),
        (400.0, 350.0, "Send Message"),
        (400.0, 450.0, "View History"),
        (700.0, 150.0, "Search Chats"),
        (700.0, 250.0, "Export Chat"),
        (700.0, 350.0, "Use Voice Mode"),
        (700.0, 450.0, "View Analytics"),
        (1000.0, 250.0, "Manage Settings"),
        (1000.0, 350.0, "Bookmark Messages"),
    ];
    const USE_CASE_SIZE: (f32, f32) = (200.0, 60.0);
    const ACTOR: (f32, f32) = (150.0, 400.0);

    let kind = DiagramKind::UseCase;
    let ink = color("ink")?;
    let outline = StrokeDefinition::solid(ink, 2.0);
    let limbs = StrokeDefinition::solid(ink, 3.0);
    let spoke = StrokeDefinition::solid(ink, 1.0);
    let actor = Point::new(ACTOR.0, ACTOR.1);

    let head = Node::new(
        ShapeKind::Oval,
        Anchor::Center,
        actor.with_y(actor.y() - 20.0),
        Size::new(40.0, 40.0),
    )?
    .with_fill(color("actor")?)
    .with_border(outline.clone());

    let mut nodes = vec![head];
    let mut edges = Vec::with_capacity(USE_CASES.len());
    for &(x, y, label) in &USE_CASES {
        let node = Node::new(
            ShapeKind::Oval,
            Anchor::Center,
            Point::new(x, y),
            Size::new(USE_CASE_SIZE.0, USE_CASE_SIZE.1),
        )?
        .with_label(label)
        .with_fill(color("use-case")?)
        .with_border(outline.clone())
        .with_label_color(ink);
        nodes.push(node);

        edges.push(
            Edge::new(
                actor.with_x(actor.x() + 20.0),
                Point::new(x - USE_CASE_SIZE.0 / 2.0, y),
            )
            .with_stroke(spoke.clone())
            .with_style(ConnectorStyle::Plain),
        );
    }

    // System boundary goes last so its outline sits on top of the ovals.
    let boundary = Node::new(
        ShapeKind::Rectangle,
        Anchor::TopLeft,
        Point::new(350.0, 100.0),
        Size::new(700.0, 400.0),
    )?
    .with_border(StrokeDefinition::solid(color("boundary")?, 3.0));
    nodes.push(boundary);

    let hip = actor.with_y(actor.y() + 60.0);
    let decorations = [
        Decoration::line(actor, hip, limbs.clone()),
        Decoration::line(
            Point::new(actor.x() - 30.0, actor.y() + 20.0),
            Point::new(actor.x() + 30.0, actor.y() + 20.0),
            limbs.clone(),
        ),
        Decoration::line(hip, Point::new(actor.x() - 25.0, actor.y() + 100.0), limbs.clone()),
        Decoration::line(hip, Point::new(actor.x() + 25.0, actor.y() + 100.0), limbs),
        Decoration::text(actor.with_y(actor.y() + 120.0), "User", ink),
        Decoration::text(Point::new(700.0, 80.0), "NIVI AI System", ink),
    ];

    Diagram::builder(kind.title(), 1200, 900)
        .with_nodes(nodes)
        .with_decorations(decorations)
        .with_edges(edges)
        .build()
}

fn data_flow() -> Result<Diagram, TrellisError> {
    const NODES: [(f32, f32, &str, &str, &str); 6] = [
        (100.0, 200.0, "User Input", "process", "rect"),
        (350.0, 200.0, "Frontend\nValidation", "process", "rect"),
        (600.0, 200.0, "API\nRequest", "process", "rect"),
        (850.0, 200.0, "AI\nProcessing", "process", "rect"),
        (1100.0, 200.0, "Response\nGeneration", "process", "rect"),
        (600.0, 400.0, "Data\nStorage", "storage", "rect"),
    ];
    const NODE_SIZE: (f32, f32) = (150.0, 80.0);
    const ARROWS: [((f32, f32), (f32, f32), &str); 6] = [
        ((250.0, 240.0), (350.0, 240.0), "Message"),
        ((500.0, 240.0), (600.0, 240.0), "Validated"),
        ((750.0, 240.0), (850.0, 240.0), "API Call"),
        ((1000.0, 240.0), (1100.0, 240.0), "AI Result"),
        ((675.0, 280.0), (675.0, 400.0), "Save"),
        ((675.0, 400.0), (500.0, 280.0), "Retrieve"),
    ];

    let kind = DiagramKind::DataFlow;
    let ink = color("ink")?;
    let border = StrokeDefinition::solid(ink, 3.0);

    let nodes = NODES
        .iter()
        .map(|&(x, y, label, role, shape)| -> Result<Node, TrellisError> {
            Ok(Node::new(
                shape.parse::<ShapeKind>()?,
                Anchor::TopLeft,
                Point::new(x, y),
                Size::new(NODE_SIZE.0, NODE_SIZE.1),
            )?
            .with_label(label)
            .with_fill(color(role)?)
            .with_border(border.clone())
            .with_label_color(ink))
        })
        .collect::<Result<Vec<_>, TrellisError>>()?;

    let stroke = StrokeDefinition::solid(ink, 3.0);
    Diagram::builder(kind.title(), 1400, 600)
        .with_nodes(nodes)
        .with_edges(
            ARROWS
                .iter()
                .map(|&(from, to, label)| arrow(from, to, &stroke, label).with_label_color(ink)),
        )
        .build()
}

fn component_tree() -> Result<Diagram, TrellisError> {
    const COMPONENTS: [(f32, f32, f32, f32, &str, &str); 16] = [
        (600.0, 100.0, 200.0, 60.0, "App (Root)", "root"),
        (200.0, 220.0, 150.0, 50.0, "AuthProvider", "child"),
        (400.0, 220.0, 150.0, 50.0, "ThemeProvider", "child"),
        (600.0, 220.0, 150.0, 50.0, "Router", "child"),
        (800.0, 220.0, 150.0, 50.0, "Sidebar", "child"),
        (1000.0, 220.0, 150.0, 50.0, "ChatArea", "child"),
        (100.0, 340.0, 120.0, 40.0, "Login", "leaf"),
        (250.0, 340.0, 120.0, 40.0, "Register", "leaf"),
        (750.0, 340.0, 120.0, 40.0, "ChatHistory", "leaf"),
        (900.0, 340.0, 120.0, 40.0, "SearchBar", "leaf"),
        (950.0, 340.0, 120.0, 40.0, "Header", "leaf"),
        (950.0, 420.0, 120.0, 40.0, "MessageList", "leaf"),
        (950.0, 500.0, 120.0, 40.0, "InputArea", "leaf"),
        (850.0, 580.0, 100.0, 35.0, "FileUpload", "leaf"),
        (970.0, 580.0, 100.0, 35.0, "VoiceInput", "leaf"),
        (1090.0, 580.0, 100.0, 35.0, "SendButton", "leaf"),
    ];
    const CONNECTIONS: [((f32, f32), (f32, f32)); 15] = [
        ((600.0, 160.0), (275.0, 220.0)),
        ((600.0, 160.0), (475.0, 220.0)),
        ((600.0, 160.0), (675.0, 220.0)),
        ((600.0, 160.0), (875.0, 220.0)),
        ((600.0, 160.0), (1075.0, 220.0)),
        ((200.0, 270.0), (160.0, 340.0)),
        ((200.0, 270.0), (310.0, 340.0)),
        ((875.0, 270.0), (810.0, 340.0)),
        ((875.0, 270.0), (960.0, 340.0)),
        ((1075.0, 270.0), (1010.0, 340.0)),
        ((1075.0, 270.0), (1010.0, 420.0)),
        ((1075.0, 270.0), (1010.0, 500.0)),
        ((1010.0, 535.0), (900.0, 580.0)),
        ((1010.0, 535.0), (1020.0, 580.0)),
        ((1010.0, 535.0), (1140.0, 580.0)),
    ];
    const LINE_HEIGHT: f32 = 15.0;

    let kind = DiagramKind::ComponentTree;
    let ink = color("ink")?;
    let border = StrokeDefinition::solid(ink, 2.0);

    let nodes = COMPONENTS
        .iter()
        .map(|&(x, y, w, h, label, role)| -> Result<Node, TrellisError> {
            Ok(Node::new(ShapeKind::Rectangle, Anchor::Center, Point::new(x, y), Size::new(w, h))?
                .with_label(label)
                .with_fill(color(role)?)
                .with_border(border.clone())
                .with_label_color(ink)
                .with_line_height(LINE_HEIGHT))
        })
        .collect::<Result<Vec<_>, TrellisError>>()?;

    let stroke = StrokeDefinition::solid(ink, 2.0);
    Diagram::builder(kind.title(), 1200, 1000)
        .with_nodes(nodes)
        .with_edges(CONNECTIONS.iter().map(|&(from, to)| {
            arrow(from, to, &stroke, "").with_style(ConnectorStyle::Plain)
        }))
        .build()
}

fn flow_chart() -> Result<Diagram, TrellisError> {
    const STEPS: [(f32, f32, f32, f32, &str, &str, &str); 9] = [
        (400.0, 100.0, 100.0, 50.0, "START", "start", "oval"),
        (400.0, 200.0, 150.0, 60.0, "User Access\nApplication", "process", "rect"),
        (400.0, 320.0, 120.0, 80.0, "Authenticated?", "decision", "diamond"),
        (250.0, 450.0, 140.0, 60.0, "Show\nLogin/Register", "process", "rect"),
        (550.0, 450.0, 140.0, 60.0, "Load User\nData", "process", "rect"),
        (250.0, 570.0, 140.0, 60.0, "Enter\nCredentials", "process", "rect"),
        (250.0, 690.0, 140.0, 60.0, "Validate\nCredentials", "process", "rect"),
        (250.0, 810.0, 140.0, 60.0, "Generate\nJWT Token", "process", "rect"),
        (550.0, 690.0, 140.0, 60.0, "Show Main\nApplication", "process", "rect"),
    ];
    const ARROWS: [((f32, f32), (f32, f32), &str); 10] = [
        ((400.0, 150.0), (400.0, 200.0), ""),
        ((400.0, 260.0), (400.0, 280.0), ""),
        ((340.0, 340.0), (250.0, 450.0), "No"),
        ((460.0, 340.0), (550.0, 450.0), "Yes"),
        ((250.0, 510.0), (250.0, 570.0), ""),
        ((250.0, 630.0), (250.0, 690.0), ""),
        ((250.0, 750.0), (250.0, 810.0), ""),
        ((320.0, 810.0), (550.0, 750.0), ""),
        ((550.0, 750.0), (550.0, 690.0), ""),
        ((550.0, 510.0), (550.0, 690.0), ""),
    ];
    const LINE_HEIGHT: f32 = 18.0;

    let kind = DiagramKind::FlowChart;
    let ink = color("ink")?;
    let border = StrokeDefinition::solid(ink, 3.0);

    let nodes = STEPS
        .iter()
        .map(|&(x, y, w, h, label, role, shape)| -> Result<Node, TrellisError> {
            Ok(Node::new(
                shape.parse::<ShapeKind>()?,
                Anchor::Center,
                Point::new(x, y),
                Size::new(w, h),
            )?
            .with_label(label)
            .with_fill(color(role)?)
            .with_border(border.clone())
            .with_label_color(ink)
            .with_line_height(LINE_HEIGHT))
        })
        .collect::<Result<Vec<_>, TrellisError>>()?;

    let stroke = StrokeDefinition::solid(ink, 3.0);
    Diagram::builder(kind.title(), 800, 1000)
        .with_nodes(nodes)
        .with_edges(
            ARROWS
                .iter()
                .map(|&(from, to, label)| arrow(from, to, &stroke, label).with_label_color(ink)),
        )
        .build()
}
