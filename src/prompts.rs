//! Fixed instruction texts sent to the models.

use crate::styles::render_catalog;

/// Camera angle / hand pose instructions cycled through for variations.
pub const POSES: [&str; 10] = [
    "hands gently cupped together, as if holding something precious, with a slightly overhead camera angle.",
    "one hand resting flat, palm down, while the other hand is gracefully placed on top of it, focusing on the top hand's nails.",
    "the back of both hands, with fingers slightly curled and relaxed, side-by-side.",
    "a close-up of the hands with fingers intertwined, showcasing the nail art from a diagonal angle.",
    "both hands held up with palms facing forward, fingers slightly spread apart.",
    "a side view of both hands, held parallel to each other, with fingers extended.",
    "one hand making a soft fist, with the other hand resting gently on its side, focusing on the contrast in shapes.",
    "the hands crossed at the wrist, fingers relaxed and extended over the pillow.",
    "a close-up shot focusing on the thumbs, with the other fingers softly blurred in the background.",
    "one hand laid flat and the other perpendicular to it, resting its side on the first hand's palm.",
];

/// Salon name used in captions.
pub const SALON_NAME: &str = "Sparkles Nail Loft";

/// Contact line every caption carries verbatim.
pub const CONTACT_LINE: &str = "📍 Sparkles Nail Loft | 📞 555-123-4567";

/// The pose for the variation at `index`, wrapping past the end of the table.
#[must_use]
pub fn pose_for(index: usize) -> &'static str {
    POSES[index % POSES.len()]
}

/// System instruction for prompt enhancement, grounded in the style catalog.
#[must_use]
pub fn enhance_system_instruction() -> String {
    format!(
        "You are a world-class nail art prompt engineer. Your goal is to create a detailed, vivid prompt for an AI image generator. The output image must be a realistic photo of both of a Kenyan woman's hands on a fluffy and furry square pillow, taken under the shine of a ring light. The photo should look like realistic phone photography, possibly with some light grain, not a glossy, hyper-realistic AI render.

Analyze the user's request, which may include a reference image and/or a text description.

First, identify the core nail style from the user's input by cross-referencing with this provided nail style information:
{catalog}
Once you identify the style, build a new, enhanced prompt.
- Describe the model's hands, including skin complexion (e.g., deep ebony, rich cocoa), and finger characteristics (e.g., slender, long, short, chubby).
- If the user provided a prompt, refine it and add more detail, but you MUST keep the core nail style they described.
- If the user only provided an image, describe the image in detail, including the identified nail style, shape, length, color, finish, and any art or embellishments.
- The final prompt MUST be a single paragraph of text. Do NOT include any other explanations, headings, or markdown formatting.
- The prompt MUST include phrases like \"shot on a smartphone,\" \"natural lighting from a ring light,\" \"subtle film grain,\" \"realistic photo,\" \"soft shadows,\" to guide the image style.
- The prompt MUST specify the background is a \"fluffy and furry white square pillow\".
",
        catalog = render_catalog()
    )
}

/// User turn for prompt enhancement, quoting the current prompt.
#[must_use]
pub fn enhance_request(current: &str) -> String {
    let current = if current.trim().is_empty() { "No prompt provided." } else { current };
    format!(
        "User's current prompt is: \"{current}\" Based on the context, create or enhance the prompt."
    )
}

/// Instruction for one variation of the master image.
#[must_use]
pub fn variation_instruction(pose: &str) -> String {
    format!(
        "Generate a variation of this image which features two hands. It is extremely important that you DO NOT change the hand model, nail design, nail shape, colors, nail art, skin tone, finger shape, or any accessories. The background and lighting must also remain exactly the same.
The ONLY things that should change are the camera angle and the pose of both hands.
The new pose should be: **{pose}**
Ensure the new image is not identical to the original."
    )
}

/// System instruction for caption writing.
#[must_use]
pub fn caption_system_instruction() -> String {
    format!(
        "You are a fun, bubbly social media manager for a trendy nail salon called \"{SALON_NAME}\".
Your tone is casual, human, and genuinely excited, not overly verbose or descriptive.
Analyze the provided description of a nail set.
Based on the description, create a social media caption.
The caption MUST strictly follow this template, in this exact order, with no extra text or labels:
1. A short, catchy, and human-sounding sentence celebrating the nail design. For example, instead of \"Obsessed is an understatement for these stunning coffin nails...\", say something more direct like \"Obsessing over these little hearts!\".
2. A Call to Action (CTA), for example: \"DM us to book your new set! ✨\"
3. The business contact info: \"{CONTACT_LINE}\"
4. A list of exactly 15 relevant keywords describing the style, color, and technique, separated by commas.
5. A list of exactly 5 relevant hashtags, each starting with #.

Each of these 5 points must be on a new line."
    )
}

/// User turn for caption writing.
#[must_use]
pub fn caption_request(prompt: &str) -> String {
    format!(
        "The nail design is described as: \"{prompt}\". Generate the caption for a social media post featuring images of these nails."
    )
}
