mod harness;
mod startup;
mod token_panel;
