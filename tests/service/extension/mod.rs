mod reject;
