//! Catalog of nail services used to ground prompt enhancement.

/// One nail service style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NailStyle {
    /// Service name as shown on the salon menu.
    pub name: &'static str,
    /// What the service involves.
    pub description: &'static str,
    /// What sets it apart from the neighbouring services.
    pub differentiator: &'static str,
}

/// Every service the salon offers.
pub const NAIL_STYLES: &[NailStyle] = &[
    NailStyle {
        name: "Plain Gel Manicure",
        description: "A standard manicure process (shaping, cuticle care) finished with a gel polish that is cured under a UV/LED lamp. The gel gives a high-shine, chip-resistant color that typically lasts 2-3 weeks.",
        differentiator: "Simple color application on natural nails for durability and shine. No added length or significant extra strength/thickness.",
    },
    NailStyle {
        name: "Tips & Gel",
        description: "Artificial plastic tips are glued onto the natural nail to add length. A gel polish color is then applied over the entire nail (tip + natural nail).",
        differentiator: "Adds length using a pre-formed plastic tip, which is then covered with gel color. Less structured than 'Builder' options.",
    },
    NailStyle {
        name: "Builder Overlay",
        description: "A layer of Builder Gel (a thicker, strong gel, sometimes called BIAB - Builder in a Bottle) is applied directly onto the natural nail. It adds significant strength and a protective, slightly thicker layer to reinforce the natural nail, helping it grow.",
        differentiator: "Strength and structure applied to the natural nail only (no added length via tips/forms). Great for weak nails or nail biters.",
    },
    NailStyle {
        name: "Gum Gel Overlay",
        description: "Similar to Builder Gel, a layer of Gum Gel (often referred to as Polygel, which is a hybrid of acrylic and gel) is applied directly as an overlay on the natural nail. It's generally thicker in consistency than traditional builder gel, offering exceptional strength and durability.",
        differentiator: "Maximum strength and thickness applied to the natural nail only. Gum Gel is a thicker, sculptable product that provides a very hard, durable overlay.",
    },
    NailStyle {
        name: "Builder & Tips",
        description: "This service combines the length of an extension with the strength of Builder Gel. Artificial tips are glued on for length, and then the Builder Gel is applied over the top of the entire nail and tip.",
        differentiator: "Uses a pre-formed tip for length, and then the Builder Gel is used to create a strong, durable, structured enhancement over both the natural nail and the tip.",
    },
    NailStyle {
        name: "Tips & Gum Gel",
        description: "This combines the length of an extension with the strength of Gum Gel. Artificial tips are glued on for length, and the Gum Gel is then sculpted and applied over the entire nail and tip.",
        differentiator: "Uses a pre-formed tip for length, and the Gum Gel is used to create a strong, durable, sculpted enhancement over both the natural nail and the tip.",
    },
    NailStyle {
        name: "French Tips",
        description: "A classic nail style where the tip (or free edge) of the nail is painted a different color (traditionally white) and the nail bed is covered with a nude or sheer pink color. This style can be applied over any of the base services listed above.",
        differentiator: "A specific design/style characterized by the distinct, painted line/color on the tip of the nail.",
    },
    NailStyle {
        name: "Ombre",
        description: "A nail style where two or more colors are blended together on the nail surface to create a smooth, gradual gradient effect. This style can be done with regular polish, gel, or colored acrylic/gum/builder products.",
        differentiator: "A specific design/style characterized by the seamless color fade from one shade to another across the nail.",
    },
    NailStyle {
        name: "Builder Extensions",
        description: "Creates a significant extension in length and shape by sculpting the Builder Gel product past the natural nail's free edge, typically using a temporary nail form as a guide. It is a fully sculpted nail extension, not just a glued-on plastic tip.",
        differentiator: "Fully sculpted extension made purely of Builder Gel without a plastic tip underneath. Offers a custom, structured length and shape.",
    },
    NailStyle {
        name: "Gumgel Extensions",
        description: "Creates a significant extension in length and shape by sculpting the Gum Gel product past the natural nail's free edge, typically using a temporary nail form as a guide. It leverages the thick, putty-like nature of Gum Gel for sculpting.",
        differentiator: "Fully sculpted extension made purely of Gum Gel without a plastic tip underneath. Known for maximum strength and control during sculpting.",
    },
];

/// Render the catalog as the markdown list embedded in instructions.
#[must_use]
pub fn render_catalog() -> String {
    let mut out = String::new();
    for style in NAIL_STYLES {
        out.push_str(&format!(
            "- **{}**:\n  - Description: {}\n  - Key Differentiator: {}\n\n",
            style.name, style.description, style.differentiator
        ));
    }
    out
}
