//! Built-in sample data so the binary renders something without a data set.

use starmap_engine::coords::Vec2;
use starmap_render::astrometry::{Hex, Location};
use starmap_render::collab::{MemoryAssets, MemoryIndex, VectorObject, WorldLabel};
use starmap_render::model::{Border, LabelSize, Route, Sector, SectorLabel, World, Zone};
use starmap_render::options::MapOptions;

struct DemoWorld {
    name: &'static str,
    hex: (i32, i32),
    uwp: &'static str,
    pbg: &'static str,
    remarks: &'static str,
    bases: &'static str,
    zone: &'static str,
    stellar: &'static str,
}

const WORLDS: [DemoWorld; 8] = [
    DemoWorld {
        name: "Regina",
        hex: (19, 10),
        uwp: "A788899-C",
        pbg: "703",
        remarks: "Ri Pa Ph An Cp (Amindii)2",
        bases: "NS",
        zone: "",
        stellar: "F7 V BD M3 V",
    },
    DemoWorld {
        name: "Efate",
        hex: (17, 5),
        uwp: "A646930-D",
        pbg: "704",
        remarks: "Hi In",
        bases: "NS",
        zone: "",
        stellar: "M1 V M2 V",
    },
    DemoWorld {
        name: "Jenghe",
        hex: (18, 10),
        uwp: "C100568-9",
        pbg: "201",
        remarks: "Ni Va",
        bases: "",
        zone: "",
        stellar: "M2 V",
    },
    DemoWorld {
        name: "Knorbes",
        hex: (20, 8),
        uwp: "C330698-9",
        pbg: "304",
        remarks: "De Na Ni Po",
        bases: "",
        zone: "",
        stellar: "M1 V",
    },
    DemoWorld {
        name: "Roup",
        hex: (20, 7),
        uwp: "C210768-9",
        pbg: "602",
        remarks: "Na Ni Po Droy(W)",
        bases: "",
        zone: "A",
        stellar: "M1 V",
    },
    DemoWorld {
        name: "Feri",
        hex: (20, 5),
        uwp: "B384879-B",
        pbg: "603",
        remarks: "Ga Pa Ph",
        bases: "",
        zone: "A",
        stellar: "M0 V",
    },
    DemoWorld {
        name: "Yori",
        hex: (23, 10),
        uwp: "C560757-A",
        pbg: "310",
        remarks: "De Ri Chir(4)",
        bases: "",
        zone: "",
        stellar: "K2 V",
    },
    DemoWorld {
        name: "Dinom",
        hex: (21, 4),
        uwp: "X420000-0",
        pbg: "000",
        remarks: "Ba De Po",
        bases: "",
        zone: "R",
        stellar: "",
    },
];

fn world(sx: i32, sy: i32, d: &DemoWorld) -> World {
    let mut w = World::new(d.name, Location::new(sx, sy, Hex::new(d.hex.0, d.hex.1)), d.uwp);
    w.pbg = d.pbg.to_owned();
    w.remarks = d.remarks.to_owned();
    w.bases = d.bases.to_owned();
    w.zone = Zone::from_code(d.zone);
    w.allegiance = "ImDd".to_owned();
    w.stellar = d.stellar.to_owned();
    w
}

pub fn index() -> MemoryIndex {
    let mut marches = Sector::new(0, 0, "Spinward Marches");
    marches.abbreviation = Some("Spin".to_owned());
    marches.selected = true;
    marches.tags.push("Official".to_owned());
    marches.subsector_names.extend(
        [(2, "Jewell"), (3, "Regina"), (6, "Lanth"), (7, "Rhylanor")]
            .map(|(i, name)| (i, name.to_owned())),
    );
    marches.worlds = WORLDS.iter().map(|d| world(0, 0, d)).collect();

    let mut imperium = Border::new(
        [(17, 4), (22, 3), (24, 6), (24, 11), (19, 12), (16, 9)]
            .map(|(x, y)| Hex::new(x, y))
            .to_vec(),
    );
    imperium.allegiance = Some("ImDd".to_owned());
    imperium.label = Some("Domain of Deneb".to_owned());
    imperium.label_position = Some(Hex::new(21, 11));
    imperium.wrap_label = true;
    marches.borders.push(imperium);

    for (a, b) in [((19, 10), (17, 5)), ((19, 10), (23, 10)), ((17, 5), (20, 5))] {
        let mut route = Route::new(Hex::new(a.0, a.1), Hex::new(b.0, b.1));
        route.allegiance = Some("Im".to_owned());
        marches.routes.push(route);
    }
    let mut courier = Route::new(Hex::new(19, 10), Hex::new(2, 10));
    courier.end_offset = (1, 0);
    marches.routes.push(courier);

    marches.labels.push(SectorLabel {
        hex: Hex::new(22, 2),
        text: "Spinward Main".to_owned(),
        size: LabelSize::Small,
        wrap: true,
        ..SectorLabel::default()
    });

    let mut deneb = Sector::new(1, 0, "Deneb");
    deneb.tags.push("InReview".to_owned());
    deneb.worlds.push(world(1, 0, &DemoWorld {
        name: "Deneb",
        hex: (2, 10),
        uwp: "A575A77-F",
        pbg: "920",
        remarks: "Hi Cx",
        bases: "NS",
        zone: "",
        stellar: "F4 V",
    }));

    MemoryIndex::new(vec![marches, deneb])
}

pub fn assets() -> MemoryAssets {
    let mut assets = MemoryAssets::new();
    assets.insert_vector(VectorObject {
        name: "Imperium".to_owned(),
        points: [(-190.0, -160.0), (90.0, -170.0), (150.0, 60.0), (-60.0, 140.0), (-200.0, 20.0)]
            .map(|(x, y)| Vec2::new(x, y))
            .to_vec(),
        closed: true,
        map_options: MapOptions::BORDERS_MAJOR | MapOptions::NAMES_MAJOR,
        label: Some("Third Imperium".to_owned()),
        label_position: Vec2::new(-30.0, 0.0),
    });
    assets.insert_vector(VectorObject {
        name: "GreatRift".to_owned(),
        points: [(-100.0, 30.0), (-60.0, 60.0), (-20.0, 40.0)]
            .map(|(x, y)| Vec2::new(x, y))
            .to_vec(),
        closed: false,
        map_options: MapOptions::NAMES_MINOR,
        label: Some("Great Rift".to_owned()),
        label_position: Vec2::new(-60.0, 50.0),
    });
    assets.push_label(WorldLabel {
        name: "Capital".to_owned(),
        position: Vec2::new(-110.0, -70.0),
        map_options: MapOptions::WORLDS_CAPITALS,
        label_offset: Vec2::new(0.0, 1.0),
    });
    assets
}
