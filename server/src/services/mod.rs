pub mod nation_evictor;
