mod item;
mod placement;
