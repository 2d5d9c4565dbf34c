mod dialogs;
mod intents;
mod panels;
mod rotation;
mod simulator;
