/// Shading for traced surface points:
/// - Cosine color palette for the iridescent base layer
/// - Reflection-driven twin specular highlights
/// - Dome shadow term from the up-facing normal component
/// - Gamma mapping from linear light to display space

pub mod material;
pub mod palette;
