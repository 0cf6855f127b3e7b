//! The standard Mediterranean theater - the fixed compiled-in dataset
//!
//! Node positions are renderer hints only; the simulation reads nothing
//! from them. Economic constants are per-node tuning data.

use crate::core::types::{Faction, NodeId, UnitKind, Vec2};
use crate::map::graph::MapGraph;
use crate::map::node::Node;

pub const ROMA: NodeId = NodeId("roma");
pub const OSTIA: NodeId = NodeId("ostia");
pub const CAPUA: NodeId = NodeId("capua");
pub const NEAPOLIS: NodeId = NodeId("neapolis");
pub const TARENTUM: NodeId = NodeId("tarentum");
pub const ARIMINUM: NodeId = NodeId("ariminum");
pub const GENUA: NodeId = NodeId("genua");

pub const CARTHAGO: NodeId = NodeId("carthago");
pub const UTICA: NodeId = NodeId("utica");
pub const HADRUMETUM: NodeId = NodeId("hadrumetum");
pub const HIPPO: NodeId = NodeId("hippo");
pub const PANORMUS: NodeId = NodeId("panormus");
pub const LILYBAEUM: NodeId = NodeId("lilybaeum");
pub const CARTHAGO_NOVA: NodeId = NodeId("carthago-nova");

pub const SYRACUSAE: NodeId = NodeId("syracusae");
pub const MESSANA: NodeId = NodeId("messana");
pub const CARALIS: NodeId = NodeId("caralis");
pub const ALERIA: NodeId = NodeId("aleria");
pub const MASSILIA: NodeId = NodeId("massilia");

pub const MARE_LIGUSTICUM: NodeId = NodeId("mare-ligusticum");
pub const MARE_TYRRHENUM: NodeId = NodeId("mare-tyrrhenum");
pub const MARE_SARDUM: NodeId = NodeId("mare-sardum");
pub const MARE_SICULUM: NodeId = NodeId("mare-siculum");
pub const MARE_AFRICUM: NodeId = NodeId("mare-africum");
pub const MARE_IONIUM: NodeId = NodeId("mare-ionium");

/// Gold each faction starts with
pub const STARTING_GOLD: u64 = 400;

/// Build the standard theater graph
pub fn standard_graph() -> MapGraph {
    let mut graph = MapGraph::new();

    // Roman heartland
    graph.insert(
        Node::city(ROMA, "Roma", Vec2::new(490.0, 240.0))
            .owned_by(Faction::Rome)
            .with_income(200)
            .with_manpower(20, 2000, 1200),
    );
    graph.insert(
        Node::port(OSTIA, "Ostia", Vec2::new(470.0, 260.0))
            .owned_by(Faction::Rome)
            .with_income(80)
            .with_manpower(10, 800, 500),
    );
    graph.insert(
        Node::city(CAPUA, "Capua", Vec2::new(530.0, 300.0))
            .owned_by(Faction::Rome)
            .with_income(100)
            .with_manpower(12, 1000, 600),
    );
    graph.insert(
        Node::port(NEAPOLIS, "Neapolis", Vec2::new(545.0, 320.0))
            .owned_by(Faction::Rome)
            .with_income(90)
            .with_manpower(10, 800, 500),
    );
    graph.insert(
        Node::port(TARENTUM, "Tarentum", Vec2::new(620.0, 340.0))
            .owned_by(Faction::Rome)
            .with_income(90)
            .with_manpower(10, 800, 400),
    );
    graph.insert(
        Node::city(ARIMINUM, "Ariminum", Vec2::new(500.0, 170.0))
            .owned_by(Faction::Rome)
            .with_income(70)
            .with_manpower(8, 700, 400),
    );
    graph.insert(
        Node::port(GENUA, "Genua", Vec2::new(420.0, 150.0))
            .owned_by(Faction::Rome)
            .with_income(60)
            .with_manpower(8, 600, 300),
    );

    // Carthaginian empire
    graph.insert(
        Node::port(CARTHAGO, "Carthago", Vec2::new(470.0, 520.0))
            .owned_by(Faction::Carthage)
            .with_income(220)
            .with_manpower(20, 2000, 1200),
    );
    graph.insert(
        Node::port(UTICA, "Utica", Vec2::new(445.0, 505.0))
            .owned_by(Faction::Carthage)
            .with_income(80)
            .with_manpower(10, 800, 500),
    );
    graph.insert(
        Node::city(HADRUMETUM, "Hadrumetum", Vec2::new(495.0, 560.0))
            .owned_by(Faction::Carthage)
            .with_income(70)
            .with_manpower(10, 800, 400),
    );
    graph.insert(
        Node::port(HIPPO, "Hippo Regius", Vec2::new(380.0, 520.0))
            .owned_by(Faction::Carthage)
            .with_income(60)
            .with_manpower(8, 700, 400),
    );
    graph.insert(
        Node::port(PANORMUS, "Panormus", Vec2::new(520.0, 420.0))
            .owned_by(Faction::Carthage)
            .with_income(80)
            .with_manpower(8, 700, 400),
    );
    graph.insert(
        Node::port(LILYBAEUM, "Lilybaeum", Vec2::new(490.0, 435.0))
            .owned_by(Faction::Carthage)
            .with_income(80)
            .with_manpower(8, 700, 400),
    );
    graph.insert(
        Node::port(CARTHAGO_NOVA, "Carthago Nova", Vec2::new(220.0, 400.0))
            .owned_by(Faction::Carthage)
            .with_income(100)
            .with_manpower(12, 900, 500),
    );

    // Neutral powers
    graph.insert(
        Node::port(SYRACUSAE, "Syracusae", Vec2::new(560.0, 455.0))
            .with_income(120)
            .with_manpower(12, 1000, 700),
    );
    graph.insert(
        Node::port(MESSANA, "Messana", Vec2::new(560.0, 420.0))
            .with_income(60)
            .with_manpower(8, 600, 350),
    );
    graph.insert(
        Node::port(CARALIS, "Caralis", Vec2::new(400.0, 370.0))
            .with_income(50)
            .with_manpower(6, 500, 300),
    );
    graph.insert(
        Node::port(ALERIA, "Aleria", Vec2::new(420.0, 270.0))
            .with_income(40)
            .with_manpower(6, 500, 300),
    );
    graph.insert(
        Node::port(MASSILIA, "Massilia", Vec2::new(330.0, 150.0))
            .with_income(70)
            .with_manpower(8, 700, 400),
    );

    // Sea zones; the starting fleets hold the home waters
    graph.insert(Node::sea(MARE_LIGUSTICUM, "Mare Ligusticum", Vec2::new(380.0, 190.0)));
    graph.insert(
        Node::sea(MARE_TYRRHENUM, "Mare Tyrrhenum", Vec2::new(490.0, 330.0)).owned_by(Faction::Rome),
    );
    graph.insert(Node::sea(MARE_SARDUM, "Mare Sardum", Vec2::new(340.0, 330.0)));
    graph.insert(Node::sea(MARE_SICULUM, "Mare Siculum", Vec2::new(480.0, 470.0)));
    graph.insert(
        Node::sea(MARE_AFRICUM, "Mare Africum", Vec2::new(420.0, 560.0)).owned_by(Faction::Carthage),
    );
    graph.insert(Node::sea(MARE_IONIUM, "Mare Ionium", Vec2::new(600.0, 420.0)));

    // Italian roads
    graph.connect(ROMA, OSTIA);
    graph.connect(ROMA, CAPUA);
    graph.connect(ROMA, ARIMINUM);
    graph.connect(CAPUA, NEAPOLIS);
    graph.connect(CAPUA, TARENTUM);
    graph.connect(ARIMINUM, GENUA);

    // African roads
    graph.connect(CARTHAGO, UTICA);
    graph.connect(CARTHAGO, HADRUMETUM);
    graph.connect(UTICA, HIPPO);

    // Sicilian roads
    graph.connect(MESSANA, PANORMUS);
    graph.connect(MESSANA, SYRACUSAE);
    graph.connect(PANORMUS, LILYBAEUM);
    graph.connect(LILYBAEUM, SYRACUSAE);

    // Mare Ligusticum
    graph.connect(MARE_LIGUSTICUM, GENUA);
    graph.connect(MARE_LIGUSTICUM, MASSILIA);
    graph.connect(MARE_LIGUSTICUM, ALERIA);
    graph.connect(MARE_LIGUSTICUM, MARE_TYRRHENUM);
    graph.connect(MARE_LIGUSTICUM, MARE_SARDUM);

    // Mare Tyrrhenum
    graph.connect(MARE_TYRRHENUM, OSTIA);
    graph.connect(MARE_TYRRHENUM, NEAPOLIS);
    graph.connect(MARE_TYRRHENUM, ALERIA);
    graph.connect(MARE_TYRRHENUM, MESSANA);
    graph.connect(MARE_TYRRHENUM, PANORMUS);
    graph.connect(MARE_TYRRHENUM, MARE_SARDUM);
    graph.connect(MARE_TYRRHENUM, MARE_SICULUM);
    graph.connect(MARE_TYRRHENUM, MARE_IONIUM);

    // Mare Sardum
    graph.connect(MARE_SARDUM, CARALIS);
    graph.connect(MARE_SARDUM, MASSILIA);
    graph.connect(MARE_SARDUM, CARTHAGO_NOVA);
    graph.connect(MARE_SARDUM, MARE_AFRICUM);

    // Mare Siculum
    graph.connect(MARE_SICULUM, LILYBAEUM);
    graph.connect(MARE_SICULUM, CARTHAGO);
    graph.connect(MARE_SICULUM, UTICA);
    graph.connect(MARE_SICULUM, MARE_AFRICUM);
    graph.connect(MARE_SICULUM, MARE_IONIUM);

    // Mare Africum
    graph.connect(MARE_AFRICUM, CARTHAGO);
    graph.connect(MARE_AFRICUM, UTICA);
    graph.connect(MARE_AFRICUM, HIPPO);
    graph.connect(MARE_AFRICUM, HADRUMETUM);

    // Mare Ionium
    graph.connect(MARE_IONIUM, TARENTUM);
    graph.connect(MARE_IONIUM, SYRACUSAE);
    graph.connect(MARE_IONIUM, MESSANA);

    graph.set_capital(Faction::Rome, ROMA);
    graph.set_capital(Faction::Carthage, CARTHAGO);

    graph
}

/// Forces present when the war opens: each side fields a fleet already
/// at sea (sea boarding needs a fleet on station) and two veteran land
/// units at the capital.
pub fn starting_units() -> Vec<(Faction, UnitKind, NodeId)> {
    vec![
        (Faction::Rome, UnitKind::Legion, ROMA),
        (Faction::Rome, UnitKind::Legion, ROMA),
        (Faction::Rome, UnitKind::Fleet, MARE_TYRRHENUM),
        (Faction::Carthage, UnitKind::SacredBand, CARTHAGO),
        (Faction::Carthage, UnitKind::SacredBand, CARTHAGO),
        (Faction::Carthage, UnitKind::Fleet, MARE_AFRICUM),
    ]
}
